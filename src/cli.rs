use crate::{
    banner::print_banner,
    error::{Error, USAGE},
    git::{self, Repo},
    ignore::{self, IGNORE_FILE, IgnoreUpdate},
    path,
    prompt::{self, DialoguerLinePrompter, LinePrompter, ReaderLinePrompter},
    report, rewrite,
};

use clap::Parser;
use console::style;
use std::{
    env,
    io::{self, IsTerminal},
    path::Path,
};

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(
    name = "git-cleaner",
    version,
    about = "Remove a file from a Git repository's entire history"
)]
pub struct Args {
    /// Path of the file to remove from Git history
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,
}

/// How a run that did not fail ended. Every outcome exits with status 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No commit on the current branch touches the file.
    NotInHistory,
    /// The user declined the rewrite.
    Canceled,
    /// History was rewritten and cleaned up.
    Rewritten,
}

/// The file to remove, as shown to the user and as git sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    /// Normalized path as given, relative to the invocation directory.
    display: String,
    /// Path relative to the repository root.
    repo_path: String,
}

/// Verifies git is available and that `cwd` is inside a work tree.
fn verify_environment(cwd: &Path) -> Result<Repo, Error> {
    if which::which("git").is_err() {
        return Err(Error::GitNotFound);
    }

    if !git::is_inside_work_tree(cwd) {
        return Err(Error::NotARepository);
    }

    Repo::discover(cwd).map_err(|e| {
        tracing::debug!(error = %e, "repository discovery failed");
        Error::NotARepository
    })
}

/// Validates `--file`, checks the file exists and locates it in the repo.
fn resolve_target(
    raw: Option<&str>,
    cwd: &Path,
    prefix: &str,
    root: &Path,
) -> Result<Target, Error> {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return Err(Error::Usage),
    };

    let display = path::normalize(raw);
    if !cwd.join(&display).exists() {
        return Err(Error::FileNotFound(display));
    }

    match path::repo_relative(&display, prefix, root) {
        Some(repo_path) => Ok(Target { display, repo_path }),
        None => Err(Error::OutsideRepository(display)),
    }
}

/// Runs the whole removal for the file named in `args`, starting from `cwd`.
///
/// The steps are, in order:
/// 1. Verify `git` is installed and `cwd` is inside a work tree.
/// 2. Validate `--file`, normalize it and check it exists on disk.
/// 3. List the commits on the current branch that touched it; stop with
///    [`Outcome::NotInHistory`] when there are none.
/// 4. Add it to the root `.gitignore` unless already listed.
/// 5. Show the commits and ask for confirmation through `prompter`.
/// 6. Rewrite all branches and tags, drop backup refs, expire the reflog
///    and garbage-collect.
///
/// # Errors
///
/// Any failed step ends the run with the matching [`Error`]; nothing done by
/// earlier steps is undone.
pub fn run<P: LinePrompter>(args: &Args, cwd: &Path, prompter: &mut P) -> Result<Outcome, Error> {
    let repo = verify_environment(cwd)?;
    let target = resolve_target(args.file.as_deref(), cwd, repo.prefix(), repo.root())?;
    tracing::info!(
        display = target.display.as_str(),
        repo_path = target.repo_path.as_str(),
        "target resolved"
    );

    println!("Searching for commits containing the file...");
    let commits = repo
        .commit_records(&target.repo_path)
        .map_err(Error::HistoryScan)?;

    if commits.is_empty() {
        println!(
            "The file '{}' was not found in the Git history.",
            target.display
        );
        return Ok(Outcome::NotInHistory);
    }

    let ignore_path = repo.root().join(IGNORE_FILE);
    if ignore::ensure_ignored(&ignore_path, &target.repo_path)? == IgnoreUpdate::Added {
        println!("Added '{}' to {}", target.repo_path, IGNORE_FILE);
    }

    report::print_commit_summary(&target.display, &commits);

    if !prompt::confirm_removal(prompter)? {
        println!(
            "{}",
            style("Operation canceled by the user.").yellow().bold()
        );
        return Ok(Outcome::Canceled);
    }

    println!("Removing the file from the Git history...");
    rewrite::remove_from_history(&repo, &target.repo_path)?;
    report::print_completion();

    Ok(Outcome::Rewritten)
}

/// Main CLI entry point for `git-cleaner`.
///
/// Prints the banner, then runs the pipeline with a terminal prompt when a
/// user is attached or a line reader over stdin otherwise. This is the one
/// place errors become output.
///
/// # Exit Codes
///
/// * `0` – File removed, not present in history, or removal declined.
/// * `1` – Missing `--file` (usage printed) or any fatal error.
pub fn entry() -> i32 {
    let args = Args::parse();

    print_banner();

    let result = env::current_dir()
        .map_err(Error::CurrentDir)
        .and_then(|cwd| {
            if io::stdin().is_terminal() && console::user_attended() {
                run(&args, &cwd, &mut DialoguerLinePrompter)
            } else {
                let mut prompter = ReaderLinePrompter::new(io::stdin().lock(), io::stdout());
                run(&args, &cwd, &mut prompter)
            }
        });

    match result {
        Ok(outcome) => {
            tracing::debug!(?outcome, "finished");
            0
        }
        Err(Error::Usage) => {
            println!("{USAGE}");
            Error::Usage.exit_code()
        }
        Err(e) => {
            tracing::debug!(error = ?e, "aborting");
            eprintln!("{}", style(e.to_string()).red().bold());
            e.exit_code()
        }
    }
}
