use console::style;

/// Commands the operator must run to publish the rewritten history.
pub const PUSH_COMMANDS: [&str; 2] = [
    "git push origin --force --all",
    "git push origin --force --tags",
];

/// Header plus one line per commit record.
///
/// The header states the count, so the output always has exactly
/// `commits.len() + 1` lines.
pub fn commit_summary(path: &str, commits: &[String]) -> Vec<String> {
    let header = format!(
        "The file '{}' is present in {} commit(s):",
        path,
        commits.len()
    );
    std::iter::once(header)
        .chain(commits.iter().cloned())
        .collect()
}

/// Prints [`commit_summary`], highlighting the header.
pub fn print_commit_summary(path: &str, commits: &[String]) {
    let mut lines = commit_summary(path, commits).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", style(header).bold());
    }
    for line in lines {
        println!("{line}");
    }
}

/// Final message and the push commands left to the operator.
pub fn completion_lines() -> Vec<String> {
    let mut lines = vec![
        "The file has been removed from the Git history.".to_string(),
        "Don't forget to force update the remote references with:".to_string(),
    ];
    lines.extend(PUSH_COMMANDS.iter().map(|c| c.to_string()));
    lines
}

/// Prints [`completion_lines`], with the commands in cyan.
pub fn print_completion() {
    let lines = completion_lines();
    let (messages, commands) = lines.split_at(lines.len() - PUSH_COMMANDS.len());
    for (i, message) in messages.iter().enumerate() {
        if i == 0 {
            println!("{}", style(message).green().bold());
        } else {
            println!("{message}");
        }
    }
    for command in commands {
        println!("{}", style(command).cyan());
    }
}
