//! VersionControl port - queries over repository history and working tree
//!
//! Implementations are bound to one repository. All paths returned are
//! repo-relative, in the order the underlying tool reports them.

use crate::domain::value_objects::{CutoverDate, RepoPath};
use crate::error::RatchetResult;

/// How a working-tree entry differs from `HEAD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingChange {
    /// Added to the index (`A ` or `AM`)
    Added,
    /// Not tracked (`??`)
    Untracked,
    /// Modified in the index or the working tree (`M `, ` M`, `MM`)
    Modified,
    /// Renamed, copied, deleted, conflicted; never in scope
    Other,
}

/// One line of short status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub change: WorkingChange,
    pub path: RepoPath,
}

impl StatusEntry {
    pub fn new(change: WorkingChange, path: impl Into<RepoPath>) -> Self {
        Self {
            change,
            path: path.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self.change, WorkingChange::Added | WorkingChange::Untracked)
    }
}

/// Abstract version-control interface
///
/// Implementations:
/// - `GitCli` - `git` subprocess
/// - in-memory fakes for testing
pub trait VersionControl {
    /// Name of the checked-out branch
    fn current_branch(&self) -> RatchetResult<String>;

    /// Files staged as added or copied (70% rename similarity)
    fn staged_new_files(&self) -> RatchetResult<Vec<RepoPath>>;

    /// Files added or copied by commits on `branch` after `date`
    fn files_committed_since(&self, branch: &str, date: &CutoverDate)
        -> RatchetResult<Vec<RepoPath>>;

    /// Files touched by commits on `branch` that no other branch or remote contains
    fn files_in_commits_not_on_other_branches(&self, branch: &str)
        -> RatchetResult<Vec<RepoPath>>;

    /// Short status of index and working tree, untracked files listed individually
    fn status(&self) -> RatchetResult<Vec<StatusEntry>>;

    /// Add paths to the index
    fn stage(&self, paths: &[RepoPath]) -> RatchetResult<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for Box<T> {
    fn current_branch(&self) -> RatchetResult<String> {
        (**self).current_branch()
    }

    fn staged_new_files(&self) -> RatchetResult<Vec<RepoPath>> {
        (**self).staged_new_files()
    }

    fn files_committed_since(
        &self,
        branch: &str,
        date: &CutoverDate,
    ) -> RatchetResult<Vec<RepoPath>> {
        (**self).files_committed_since(branch, date)
    }

    fn files_in_commits_not_on_other_branches(
        &self,
        branch: &str,
    ) -> RatchetResult<Vec<RepoPath>> {
        (**self).files_in_commits_not_on_other_branches(branch)
    }

    fn status(&self) -> RatchetResult<Vec<StatusEntry>> {
        (**self).status()
    }

    fn stage(&self, paths: &[RepoPath]) -> RatchetResult<()> {
        (**self).stage(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_and_untracked_are_new() {
        assert!(StatusEntry::new(WorkingChange::Added, "a.ts").is_new());
        assert!(StatusEntry::new(WorkingChange::Untracked, "b.ts").is_new());
        assert!(!StatusEntry::new(WorkingChange::Modified, "c.ts").is_new());
        assert!(!StatusEntry::new(WorkingChange::Other, "d.ts").is_new());
    }
}
