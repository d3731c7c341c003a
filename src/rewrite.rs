//! The destructive part: rewriting history and discarding every path back
//! to the old commits.

use std::fmt;

use crate::{
    error::Error,
    git::{GitError, Repo},
};

/// One step of [`remove_from_history`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStep {
    /// `git filter-branch` over all branches and tags.
    FilterBranch,
    /// Deleting `refs/original/`.
    DeleteBackupRefs,
    /// `git reflog expire`.
    ExpireReflog,
    /// `git gc`.
    GarbageCollect,
}

impl fmt::Display for RewriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FilterBranch => "removing the file",
            Self::DeleteBackupRefs => "removing original references",
            Self::ExpireReflog => "expiring reflogs",
            Self::GarbageCollect => "running garbage collection",
        };
        f.write_str(text)
    }
}

fn fail(step: RewriteStep) -> impl FnOnce(GitError) -> Error {
    move |source| Error::Rewrite { step, source }
}

/// Removes `path` from every commit on every branch and tag, then deletes
/// the backup refs, expires the reflog and prunes unreachable objects.
///
/// Steps run in order and stop at the first failure. Nothing is rolled
/// back: a failure after the filter step leaves history rewritten with
/// the old commits still reachable.
pub fn remove_from_history(repo: &Repo, path: &str) -> Result<(), Error> {
    tracing::info!(path, "rewriting history");
    repo.filter_branch_remove(path)
        .map_err(fail(RewriteStep::FilterBranch))?;

    let backups = repo
        .backup_refs()
        .map_err(fail(RewriteStep::DeleteBackupRefs))?;
    if backups.is_empty() {
        tracing::warn!("no backup refs to delete");
    }
    for refname in &backups {
        tracing::info!(refname = refname.as_str(), "deleting backup ref");
        repo.delete_ref(refname)
            .map_err(fail(RewriteStep::DeleteBackupRefs))?;
    }

    tracing::info!("expiring reflog");
    repo.expire_reflog().map_err(fail(RewriteStep::ExpireReflog))?;

    tracing::info!("running garbage collection");
    repo.gc_aggressive()
        .map_err(fail(RewriteStep::GarbageCollect))?;

    Ok(())
}
