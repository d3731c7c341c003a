#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Path to the compiled `git-cleaner` binary.
pub fn cleaner_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_git-cleaner"))
}

/// Runs a git command inside `repo_path`, panicking if it fails.
pub fn git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Runs a git command and reports only whether it succeeded.
pub fn git_succeeds(repo_path: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Initialises an empty repository with a local identity.
pub fn init_empty_repository(repo_path: &Path) {
    fs::create_dir_all(repo_path).expect("failed to create repo dir");
    git(repo_path, &["init", "--quiet"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
    git(repo_path, &["config", "user.name", "Test User"]);
    git(repo_path, &["config", "commit.gpgsign", "false"]);
    git(repo_path, &["config", "tag.gpgsign", "false"]);
}

/// Creates a temporary repository with a README commit.
pub fn create_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let repo_path = temp_dir.path().join("repo");
    init_empty_repository(&repo_path);
    commit_file(&repo_path, "README.md", "# Test Project\n", "Initial commit");
    (temp_dir, repo_path)
}

/// Writes `contents` to `relative`, stages it and commits with `message`.
pub fn commit_file(repo_path: &Path, relative: &str, contents: &str, message: &str) {
    let file = repo_path.join(relative);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(&file, contents).expect("failed to write file");
    git(repo_path, &["add", relative]);
    git(repo_path, &["commit", "--quiet", "-m", message]);
}

/// Full hash of `rev`.
pub fn rev_parse(repo_path: &Path, rev: &str) -> String {
    git(repo_path, &["rev-parse", rev]).trim().to_string()
}

/// Every ref with the object it points to, one per line.
pub fn all_refs(repo_path: &Path) -> String {
    git(
        repo_path,
        &["for-each-ref", "--format=%(refname) %(objectname)"],
    )
}

/// Runs `git-cleaner` in `dir` with `args`, feeding `input` on stdin.
pub fn run_cleaner(dir: &Path, args: &[&str], input: &str) -> Output {
    run_cleaner_with_env(dir, args, input, &[])
}

/// Like [`run_cleaner`], with extra environment variables.
pub fn run_cleaner_with_env(
    dir: &Path,
    args: &[&str],
    input: &str,
    envs: &[(&str, &Path)],
) -> Output {
    let mut cmd = Command::new(cleaner_binary());
    cmd.current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("failed to spawn git-cleaner");
    if let Some(mut stdin) = child.stdin.take() {
        // The process may exit before reading; a closed pipe is fine.
        let _ = stdin.write_all(input.as_bytes());
    }
    child.wait_with_output().expect("failed to wait for git-cleaner")
}

/// Standard output of a finished run.
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Standard error of a finished run.
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
