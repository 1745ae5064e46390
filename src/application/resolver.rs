//! Change-set resolution
//!
//! Evaluates every configured `ChangeSource` against version control and
//! folds the outputs into one `ScopeSet`.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::ports::{VersionControl, WorkingChange};
use crate::domain::services::ScopeSet;
use crate::domain::value_objects::{ChangeSource, CutoverDate, RepoPath};
use crate::error::RatchetResult;

/// Scope plus the staged-files output (restaged after a run)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScope {
    pub scope: ScopeSet,
    /// Output of the `StagedFiles` source, minus exclusions
    pub staged: Vec<RepoPath>,
}

pub struct ChangeSetResolver<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
}

impl<'a, V: VersionControl + ?Sized> ChangeSetResolver<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        Self { vcs }
    }

    /// Union all sources in order, then subtract `exclusions`
    ///
    /// Any version-control failure aborts resolution.
    pub fn resolve(
        &self,
        sources: &[ChangeSource],
        exclusions: &[RepoPath],
    ) -> RatchetResult<ResolvedScope> {
        let mut scope = ScopeSet::new();
        let mut staged = Vec::new();

        for source in sources {
            let files = self.evaluate(source)?;
            let added = scope.extend(files.iter().cloned());
            debug!(
                source = source.label(),
                reported = files.len(),
                added,
                "resolved change source"
            );
            if matches!(source, ChangeSource::StagedFiles) {
                staged.extend(files);
            }
        }

        scope.exclude(exclusions.iter().cloned());
        let excluded: HashSet<&RepoPath> = exclusions.iter().collect();
        staged.retain(|p| !excluded.contains(p));

        Ok(ResolvedScope { scope, staged })
    }

    /// Files produced by a single source, in reported order (may repeat)
    pub fn evaluate(&self, source: &ChangeSource) -> RatchetResult<Vec<RepoPath>> {
        match source {
            ChangeSource::StagedFiles => self.vcs.staged_new_files(),
            ChangeSource::CommittedSinceDate { branch, date } => {
                self.vcs.files_committed_since(branch, date)
            }
            ChangeSource::CommittedNotOnBranch { branch } => {
                self.vcs.files_in_commits_not_on_other_branches(branch)
            }
            ChangeSource::UnstagedAndStagedSinceDate { branch, date } => {
                self.unstaged_and_staged_since(branch, date)
            }
            ChangeSource::ExplicitExtra { paths } => Ok(paths.clone()),
        }
    }

    /// (modified ∩ committed-since-date), in commit-log order, then added/untracked
    ///
    /// A file modified in the working tree whose last add predates the cutover
    /// is not included.
    fn unstaged_and_staged_since(
        &self,
        branch: &str,
        date: &CutoverDate,
    ) -> RatchetResult<Vec<RepoPath>> {
        let status = self.vcs.status()?;

        let modified: HashSet<&RepoPath> = status
            .iter()
            .filter(|e| e.change == WorkingChange::Modified)
            .map(|e| &e.path)
            .collect();

        let mut files: Vec<RepoPath> = if modified.is_empty() {
            Vec::new()
        } else {
            self.vcs
                .files_committed_since(branch, date)?
                .into_iter()
                .filter(|p| modified.contains(p))
                .collect()
        };

        files.extend(status.iter().filter(|e| e.is_new()).map(|e| e.path.clone()));
        Ok(files)
    }
}
