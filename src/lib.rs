//! # git-cleaner
//!
//! A CLI tool to remove a file from a Git repository's entire history.
//!
//! This crate provides functionality to:
//! - List the commits on the current branch that touched the file
//! - Add the file to the repository's `.gitignore`
//! - Ask for confirmation before anything destructive happens
//! - Rewrite every branch and tag without the file, then drop the backup
//!   refs, expire the reflog and garbage-collect
//!
//! Nothing is pushed; the force-push commands are printed for the operator.
//!
//! ## Usage
//!
//! ```bash
//! git-cleaner --file config/secret.txt
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`git`] - Git command wrappers
//! - [`ignore`] - `.gitignore` maintenance
//! - [`path`] - Path normalization
//! - [`prompt`] - Confirmation prompt abstractions
//! - [`rewrite`] - History rewrite and cleanup sequence
//! - [`report`] - Commit summary and completion output
//! - [`banner`] - Decorative CLI banner
//! - [`error`] - Error type shared by every step
//! - [`logging`] - Diagnostic logging setup

pub mod banner;
pub mod cli;
pub mod error;
pub mod git;
pub mod ignore;
pub mod logging;
pub mod path;
pub mod prompt;
pub mod report;
pub mod rewrite;

pub use error::Error;
