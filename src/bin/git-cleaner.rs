/// Entry point for the `git-cleaner` binary.
///
/// Sets up logging, delegates to the CLI entry function and exits the
/// process with the returned exit code.
fn main() {
    git_cleaner::logging::init();
    std::process::exit(git_cleaner::cli::entry());
}
