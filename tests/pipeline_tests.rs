mod common;

use common::*;
use git_cleaner::{
    Error,
    cli::{Args, Outcome, run},
    prompt::ReaderLinePrompter,
    rewrite::RewriteStep,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn run_with_input(dir: &Path, file: &str, input: &str) -> Result<Outcome, Error> {
    let args = Args {
        file: Some(file.to_string()),
    };
    let mut prompter = ReaderLinePrompter::new(Cursor::new(input.to_string()), Vec::new());
    run(&args, dir, &mut prompter)
}

#[test]
fn untracked_file_is_not_in_history() {
    let (_tmp, repo) = create_repo();
    fs::write(repo.join("local.env"), "KEY=1").expect("write failed");

    let outcome = run_with_input(&repo, "local.env", "").expect("run failed");

    assert_eq!(outcome, Outcome::NotInHistory);
    assert!(!repo.join(".gitignore").exists());
}

#[test]
fn declined_run_only_updates_ignore_file() {
    let (_tmp, repo) = create_repo();
    fs::write(repo.join(".gitignore"), "target/").expect("write failed");
    git(&repo, &["add", ".gitignore"]);
    git(&repo, &["commit", "--quiet", "-m", "Ignore target"]);
    commit_file(&repo, "secret.txt", "token", "Add secret");
    let refs_before = all_refs(&repo);

    let outcome = run_with_input(&repo, "secret.txt", "nope\nn\n").expect("run failed");

    assert_eq!(outcome, Outcome::Canceled);
    assert_eq!(all_refs(&repo), refs_before);
    assert_eq!(
        fs::read_to_string(repo.join(".gitignore")).expect("read failed"),
        "target/\nsecret.txt\n"
    );
}

#[test]
fn already_ignored_entry_is_not_duplicated() {
    let (_tmp, repo) = create_repo();
    commit_file(&repo, "secret.txt", "token", "Add secret");
    fs::write(repo.join(".gitignore"), "secret.txt\n").expect("write failed");

    let outcome = run_with_input(&repo, "secret.txt", "no\n").expect("run failed");

    assert_eq!(outcome, Outcome::Canceled);
    assert_eq!(
        fs::read_to_string(repo.join(".gitignore")).expect("read failed"),
        "secret.txt\n"
    );
}

#[test]
fn confirmed_run_rewrites_history() {
    let (_tmp, repo) = create_repo();
    commit_file(&repo, "secret.txt", "token", "Add secret");
    commit_file(&repo, "notes.md", "notes", "Add notes");

    let outcome = run_with_input(&repo, "secret.txt", "YES\n").expect("run failed");

    assert_eq!(outcome, Outcome::Rewritten);
    assert!(git(&repo, &["log", "--all", "--format=%H", "--", "secret.txt"]).is_empty());
    assert!(git(&repo, &["for-each-ref", "refs/original/"]).is_empty());
    let tree = git(&repo, &["ls-tree", "-r", "--name-only", "HEAD"]);
    assert!(tree.lines().any(|f| f == "notes.md"));
    assert!(!tree.lines().any(|f| f == "secret.txt"));
}

#[test]
fn repository_without_commits_fails_history_scan() {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    let repo = tmp.path().join("repo");
    init_empty_repository(&repo);
    fs::write(repo.join("secret.txt"), "token").expect("write failed");

    let result = run_with_input(&repo, "secret.txt", "yes\n");

    assert!(matches!(result, Err(Error::HistoryScan(_))));
    assert!(!repo.join(".gitignore").exists());
}

#[test]
fn missing_file_argument_is_usage_error() {
    let (_tmp, repo) = create_repo();
    let mut prompter = ReaderLinePrompter::new(Cursor::new(String::new()), Vec::new());

    let result = run(&Args::default(), &repo, &mut prompter);

    assert!(matches!(result, Err(Error::Usage)));
}

#[test]
fn dirty_work_tree_fails_filter_step() {
    let (_tmp, repo) = create_repo();
    commit_file(&repo, ".gitignore", "target/\n", "Ignore target");
    commit_file(&repo, "secret.txt", "token", "Add secret");
    let refs_before = all_refs(&repo);

    let result = run_with_input(&repo, "secret.txt", "y\n");

    assert!(
        matches!(
            result,
            Err(Error::Rewrite {
                step: RewriteStep::FilterBranch,
                ..
            })
        ),
        "unexpected result: {result:?}"
    );
    assert_eq!(all_refs(&repo), refs_before);
    assert!(git(&repo, &["for-each-ref", "refs/original/"]).is_empty());
    assert_eq!(
        fs::read_to_string(repo.join(".gitignore")).expect("read failed"),
        "target/\nsecret.txt\n"
    );
}
