use std::{
    fs::OpenOptions,
    io::{Read, Write},
    path::Path,
};

use crate::error::Error;

/// Name of the ignore file kept at the repository root.
pub const IGNORE_FILE: &str = ".gitignore";

/// What [`ensure_ignored`] did to the ignore file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreUpdate {
    /// The entry was appended.
    Added,
    /// A line equal to the entry (after trimming) already existed.
    AlreadyPresent,
}

/// Appends `entry` to the ignore file at `ignore_path` unless a line
/// already matches it once trimmed.
///
/// The file is created when missing. Existing content and order are kept;
/// if the last line lacks a newline one is written before the entry.
///
/// # Parameters
///
/// * `ignore_path` – Ignore file to update, normally `<root>/.gitignore`.
/// * `entry` – Repository-relative path to list.
///
/// # Returns
///
/// * `Ok(IgnoreUpdate::Added)` if `entry` plus a newline was appended.
/// * `Ok(IgnoreUpdate::AlreadyPresent)` if the file was left untouched.
///
/// # Errors
///
/// [`Error::IgnoreFile`] if the file cannot be opened, read or appended to.
/// A failed append may leave a partial line behind.
pub fn ensure_ignored(ignore_path: &Path, entry: &str) -> Result<IgnoreUpdate, Error> {
    let io_err = |source| Error::IgnoreFile {
        path: ignore_path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(ignore_path)
        .map_err(io_err)?;

    let mut existing = String::new();
    file.read_to_string(&mut existing).map_err(io_err)?;

    if existing.lines().any(|line| line.trim() == entry) {
        tracing::debug!(entry, "already ignored");
        return Ok(IgnoreUpdate::AlreadyPresent);
    }

    let mut addition = String::with_capacity(entry.len() + 2);
    if !existing.is_empty() && !existing.ends_with('\n') {
        addition.push('\n');
    }
    addition.push_str(entry);
    addition.push('\n');

    file.write_all(addition.as_bytes()).map_err(io_err)?;
    tracing::info!(entry, path = %ignore_path.display(), "added ignore entry");
    Ok(IgnoreUpdate::Added)
}
