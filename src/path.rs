use std::path::{MAIN_SEPARATOR, Path};

/// Lexically cleans a path and converts it to `/` separators.
///
/// Collapses repeated separators and `.` segments, resolves `..` against
/// the preceding segment where possible, and keeps leading `..` segments
/// of relative paths. An empty result becomes `"."`. The filesystem is
/// never consulted.
pub fn normalize(raw: &str) -> String {
    let unified = if MAIN_SEPARATOR == '/' {
        raw.to_string()
    } else {
        raw.replace(MAIN_SEPARATOR, "/")
    };
    let rooted = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `/..` is `/`.
                _ if rooted => {}
                _ => parts.push(".."),
            },
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Maps a normalized path to a path relative to the repository root.
///
/// Relative paths are taken from the invocation directory, described by
/// `prefix` as printed by `git rev-parse --show-prefix`. Absolute paths must
/// lie under `root`.
///
/// # Parameters
///
/// * `normalized` – Output of [`normalize`].
/// * `prefix` – Invocation directory relative to the root, `/`-terminated
///   or empty.
/// * `root` – Work tree top-level directory.
///
/// # Returns
///
/// * `Some(path)` – Normalized, `/`-separated path from the root.
/// * `None` – The path names the root itself, climbs above it, or is an
///   absolute path outside it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use git_cleaner::path::repo_relative;
///
/// let root = Path::new("/work/repo");
/// assert_eq!(
///     repo_relative("../top.txt", "config/", root).as_deref(),
///     Some("top.txt")
/// );
/// assert_eq!(repo_relative("../outside.txt", "", root), None);
/// ```
pub fn repo_relative(normalized: &str, prefix: &str, root: &Path) -> Option<String> {
    let candidate = if normalized.starts_with('/') {
        let stripped = Path::new(normalized).strip_prefix(root).ok()?;
        normalize(&stripped.to_string_lossy())
    } else {
        normalize(&format!("{prefix}{normalized}"))
    };

    if candidate == "." || candidate == ".." || candidate.starts_with("../") {
        None
    } else {
        Some(candidate)
    }
}
