use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{git::GitError, rewrite::RewriteStep};

/// Usage line printed when `--file` is missing or empty.
pub const USAGE: &str = "Usage: git-cleaner --file <file_path>";

/// Everything that can stop a run before it completes.
///
/// Each pipeline step returns one of these; [`crate::cli::entry`] is the
/// only place that turns them into output and an exit code.
#[derive(Debug, Error)]
pub enum Error {
    /// `git` could not be located on `PATH`.
    #[error("`git` not found in PATH.")]
    GitNotFound,

    /// The invocation directory is not inside a work tree.
    #[error("This directory is not a Git repository. Please run the command inside a valid Git repository.")]
    NotARepository,

    /// The invocation directory itself could not be resolved.
    #[error("Unable to resolve the current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// `--file` was missing or empty.
    #[error("{}", USAGE)]
    Usage,

    /// The target file does not exist on disk.
    #[error("The file '{0}' does not exist in the current directory.")]
    FileNotFound(String),

    /// The target path resolves outside the repository work tree.
    #[error("The file '{0}' is outside the Git repository.")]
    OutsideRepository(String),

    /// The ignore file could not be opened, read or appended to.
    #[error("Error updating {}: {source}", .path.display())]
    IgnoreFile {
        /// Ignore file that was being updated.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Listing the commits that touch the target failed.
    #[error("Error searching for commits: {0}")]
    HistoryScan(#[source] GitError),

    /// Reading the confirmation answer failed.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Standard input closed before a yes/no answer was given.
    #[error("Input closed before an answer was given.")]
    InputClosed,

    /// One of the history rewrite steps failed.
    #[error("Error {step}: {source}")]
    Rewrite {
        /// Step that failed; earlier steps have already been applied.
        step: RewriteStep,
        /// Underlying git failure.
        #[source]
        source: GitError,
    },
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Usage errors and every fatal error share status 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
