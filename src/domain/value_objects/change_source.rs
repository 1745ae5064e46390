//! Change Source Value Object
//!
//! One way of deriving candidate files from version-control state. A run
//! evaluates every active source and unions the results into a `ScopeSet`.

use std::fmt;

use super::{CutoverDate, RepoPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Files staged as added or copied in the index
    StagedFiles,
    /// Added/untracked working-tree files, plus modified files that were
    /// also committed on `branch` after `date`
    UnstagedAndStagedSinceDate { branch: String, date: CutoverDate },
    /// Files added or copied by commits on `branch` after `date`
    CommittedSinceDate { branch: String, date: CutoverDate },
    /// Files added by commits on `branch` that no other branch or remote has
    CommittedNotOnBranch { branch: String },
    /// Caller-provided paths, appended verbatim
    ExplicitExtra { paths: Vec<RepoPath> },
}

impl ChangeSource {
    /// Short identifier used in logs and JSON output
    pub fn label(&self) -> &'static str {
        match self {
            ChangeSource::StagedFiles => "staged",
            ChangeSource::UnstagedAndStagedSinceDate { .. } => "unstaged_since_date",
            ChangeSource::CommittedSinceDate { .. } => "committed_since_date",
            ChangeSource::CommittedNotOnBranch { .. } => "committed_not_on_other_branches",
            ChangeSource::ExplicitExtra { .. } => "extra",
        }
    }

    /// Whether evaluating this source needs a version-control query
    pub fn queries_vcs(&self) -> bool {
        !matches!(self, ChangeSource::ExplicitExtra { .. })
    }
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeSource::StagedFiles => write!(f, "staged files"),
            ChangeSource::UnstagedAndStagedSinceDate { branch, date } => {
                write!(f, "working tree changes on {} since {}", branch, date)
            }
            ChangeSource::CommittedSinceDate { branch, date } => {
                write!(f, "commits on {} since {}", branch, date)
            }
            ChangeSource::CommittedNotOnBranch { branch } => {
                write!(f, "commits only on {}", branch)
            }
            ChangeSource::ExplicitExtra { paths } => write!(f, "{} extra file(s)", paths.len()),
        }
    }
}
