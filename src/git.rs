use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// `git log` format for one commit record: `{short-hash} {date} | {subject}{refs} [{author}]`.
pub const RECORD_FORMAT: &str = "--pretty=format:%h %ad | %s%d [%an]";

/// Namespace where `git filter-branch` keeps the pre-rewrite refs.
pub const BACKUP_REF_NAMESPACE: &str = "refs/original/";

/// Failure of a single `git` invocation.
#[derive(Debug, Error)]
pub enum GitError {
    /// The process could not be started.
    #[error("failed to execute `{command}`: {source}")]
    Exec {
        /// Command line that was attempted.
        command: String,
        /// Spawn failure.
        #[source]
        source: io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("`{command}` failed ({status}){}", format_stderr(.stderr))]
    Failed {
        /// Command line that failed.
        command: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Trimmed standard error, empty when it was not captured.
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Renders `git <args>` for messages and logs.
fn describe(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

/// Runs a command and returns its standard output on success.
///
/// On a non-zero exit the trimmed standard error becomes part of the
/// [`GitError::Failed`] value.
fn run_output(mut cmd: Command, command: String) -> Result<String, GitError> {
    tracing::debug!(%command, "running");
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    let out = cmd.output().map_err(|source| GitError::Exec {
        command: command.clone(),
        source,
    })?;

    if out.status.success() {
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    } else {
        Err(GitError::Failed {
            command,
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        })
    }
}

/// Runs a command with inherited stdio so git can report progress itself.
fn run_status(mut cmd: Command, command: String) -> Result<(), GitError> {
    tracing::debug!(%command, "running with inherited stdio");
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    let status = cmd.status().map_err(|source| GitError::Exec {
        command: command.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(GitError::Failed {
            command,
            status,
            stderr: String::new(),
        })
    }
}

/// Runs `git rev-parse <flag>` in `dir` and returns its trimmed output.
fn rev_parse(dir: &Path, flag: &str) -> Result<String, GitError> {
    let args = ["rev-parse", flag];
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    run_output(cmd, describe(&args)).map(|s| s.trim().to_string())
}

/// Reports whether `dir` lies inside a git work tree.
///
/// Any failure to decide (git missing, not a repository, inside `.git`)
/// counts as `false`.
pub fn is_inside_work_tree(dir: &Path) -> bool {
    match rev_parse(dir, "--is-inside-work-tree") {
        Ok(answer) => answer == "true",
        Err(e) => {
            tracing::debug!(error = %e, "work tree check failed");
            false
        }
    }
}

/// Splits `git log` output into commit records, dropping blank lines.
pub fn split_records(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Quotes `value` for a POSIX shell, as `git filter-branch` evaluates its
/// filters with `sh`.
pub(crate) fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds the `--index-filter` expression that unstages `path` from every
/// rewritten commit, ignoring commits where it is absent.
///
/// The path is single-quoted with embedded quotes escaped as `'\''`, and
/// `--` ends `git rm`'s options. Without both, names containing `'` break
/// the shell and names starting with `-` are read as flags, so the
/// expression must keep this form.
///
/// # Examples
///
/// ```
/// use git_cleaner::git::index_filter;
///
/// assert_eq!(
///     index_filter("-it's.txt"),
///     r"git rm --cached --ignore-unmatch -- '-it'\''s.txt'"
/// );
/// ```
pub fn index_filter(path: &str) -> String {
    format!("git rm --cached --ignore-unmatch -- {}", shell_quote(path))
}

/// A work tree, located from the directory the tool was started in.
#[derive(Debug, Clone)]
pub struct Repo {
    root: PathBuf,
    prefix: String,
}

impl Repo {
    /// Resolves the repository containing `dir`.
    pub fn discover(dir: &Path) -> Result<Self, GitError> {
        let root = PathBuf::from(rev_parse(dir, "--show-toplevel")?);
        let prefix = rev_parse(dir, "--show-prefix")?;
        tracing::debug!(root = %root.display(), %prefix, "repository discovered");
        Ok(Self { root, prefix })
    }

    /// Top-level directory of the work tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the invocation directory relative to the root, `/`-terminated
    /// or empty at the root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.root);
        cmd
    }

    /// Lists the commits of the checked-out branch that touched `path`,
    /// most recent first.
    ///
    /// Runs `git log` with [`RECORD_FORMAT`] and `--date=short` at the
    /// repository root. Other branches and tags are not searched.
    ///
    /// # Parameters
    ///
    /// * `path` – Repository-relative, `/`-separated path.
    ///
    /// # Returns
    ///
    /// * `Ok(records)` – One opaque display line per commit, blank lines
    ///   dropped; empty when no commit touched the path.
    ///
    /// # Errors
    ///
    /// * [`GitError::Exec`] if git could not be started.
    /// * [`GitError::Failed`] if `git log` exited non-zero, e.g. on a branch
    ///   with no commits yet.
    pub fn commit_records(&self, path: &str) -> Result<Vec<String>, GitError> {
        let args = ["log", RECORD_FORMAT, "--date=short", "--", path];
        let output = run_output(self.command(&args), describe(&args))?;
        Ok(split_records(&output))
    }

    /// Rewrites every branch and tag so that no commit's tree contains
    /// `path`, dropping commits left empty by the removal.
    pub fn filter_branch_remove(&self, path: &str) -> Result<(), GitError> {
        let filter = index_filter(path);
        let args = [
            "filter-branch",
            "--force",
            "--index-filter",
            filter.as_str(),
            "--prune-empty",
            "--tag-name-filter",
            "cat",
            "--",
            "--all",
        ];
        let mut cmd = self.command(&args);
        cmd.env("FILTER_BRANCH_SQUELCH_WARNING", "1");
        run_status(cmd, describe(&args))
    }

    /// Lists the refs under [`BACKUP_REF_NAMESPACE`].
    pub fn backup_refs(&self) -> Result<Vec<String>, GitError> {
        let args = ["for-each-ref", "--format=%(refname)", BACKUP_REF_NAMESPACE];
        let output = run_output(self.command(&args), describe(&args))?;
        Ok(split_records(&output))
    }

    /// Deletes a single ref, loose or packed.
    pub fn delete_ref(&self, refname: &str) -> Result<(), GitError> {
        let args = ["update-ref", "-d", refname];
        run_output(self.command(&args), describe(&args)).map(|_| ())
    }

    /// Expires every reflog entry immediately.
    pub fn expire_reflog(&self) -> Result<(), GitError> {
        let args = ["reflog", "expire", "--expire=now", "--all"];
        run_output(self.command(&args), describe(&args)).map(|_| ())
    }

    /// Repacks aggressively and prunes unreachable objects immediately.
    pub fn gc_aggressive(&self) -> Result<(), GitError> {
        let args = ["gc", "--prune=now", "--aggressive"];
        run_output(self.command(&args), describe(&args)).map(|_| ())
    }
}
