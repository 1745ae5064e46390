//! Orchestrator Options
//!
//! One canonical record of what a run includes, how it is checked, and how
//! the watch loop behaves.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::watch::DEBOUNCE_MS;
use crate::domain::ports::LintConfig;
use crate::domain::value_objects::{ChangeSource, CompilerOptions, CutoverDate, RepoPath};

use super::result::RunResult;

/// Invoked with every result `run()` returns
pub type ResultCallback = Box<dyn FnMut(&RunResult) + Send>;

pub struct OrchestratorOptions {
    /// Repository root; scope paths are joined onto it
    pub repo_path: PathBuf,
    /// Files always in scope, relative to the root
    pub extra_files: Vec<RepoPath>,
    /// Files newly added to the index
    pub include_staged_files: bool,
    /// Working-tree changes to files added since `leak_date`, plus new files
    pub include_unstaged_files: bool,
    /// Files added on the current branch since `leak_date`
    pub include_current_branch_committed_files: bool,
    /// Files touched by commits that are on no other branch or remote
    pub include_all_current_branch_committed_files_not_in_master: bool,
    /// Watch scope files individually, re-registered around each run
    pub watch_included_files: bool,
    /// Directories (or files) watched once for the life of the watch loop
    pub watch_files: Vec<PathBuf>,
    /// Gitignore-style globs for events the watch loop drops
    pub ignore_files_from_watch: Vec<String>,
    /// Cutover date for the since-date sources; without it they contribute nothing
    pub leak_date: Option<CutoverDate>,
    /// Files never in scope, relative to the root
    pub exclude_files: Vec<RepoPath>,
    pub type_checker_config: CompilerOptions,
    pub lint_config: LintConfig,
    /// Share the checker's program with the linter for type-aware rules
    pub type_aware_lint: bool,
    /// Quiet period before a burst of changes triggers a run
    pub debounce: Duration,
    pub on_results: Option<ResultCallback>,
}

impl OrchestratorOptions {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            extra_files: Vec::new(),
            include_staged_files: false,
            include_unstaged_files: false,
            include_current_branch_committed_files: false,
            include_all_current_branch_committed_files_not_in_master: false,
            watch_included_files: false,
            watch_files: Vec::new(),
            ignore_files_from_watch: Vec::new(),
            leak_date: None,
            exclude_files: Vec::new(),
            type_checker_config: CompilerOptions::default(),
            lint_config: LintConfig::default(),
            type_aware_lint: true,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            on_results: None,
        }
    }

    pub fn with_staged_files(mut self, enabled: bool) -> Self {
        self.include_staged_files = enabled;
        self
    }

    pub fn with_unstaged_files(mut self, enabled: bool) -> Self {
        self.include_unstaged_files = enabled;
        self
    }

    pub fn with_current_branch_committed_files(mut self, enabled: bool) -> Self {
        self.include_current_branch_committed_files = enabled;
        self
    }

    pub fn with_committed_files_not_in_master(mut self, enabled: bool) -> Self {
        self.include_all_current_branch_committed_files_not_in_master = enabled;
        self
    }

    pub fn with_leak_date(mut self, date: CutoverDate) -> Self {
        self.leak_date = Some(date);
        self
    }

    pub fn with_extra_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RepoPath>,
    {
        self.extra_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RepoPath>,
    {
        self.exclude_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_watch_included_files(mut self, enabled: bool) -> Self {
        self.watch_included_files = enabled;
        self
    }

    pub fn with_watch_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.watch_files = paths;
        self
    }

    pub fn with_ignore_files_from_watch(mut self, patterns: Vec<String>) -> Self {
        self.ignore_files_from_watch = patterns;
        self
    }

    pub fn with_type_checker_config(mut self, options: CompilerOptions) -> Self {
        self.type_checker_config = options;
        self
    }

    pub fn with_lint_config(mut self, config: LintConfig) -> Self {
        self.lint_config = config;
        self
    }

    pub fn with_type_aware_lint(mut self, enabled: bool) -> Self {
        self.type_aware_lint = enabled;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn on_results<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&RunResult) + Send + 'static,
    {
        self.on_results = Some(Box::new(callback));
        self
    }

    /// Whether the watch loop has anything to watch
    pub fn watch_enabled(&self) -> bool {
        self.watch_included_files || !self.watch_files.is_empty()
    }

    /// Change sources in evaluation order
    ///
    /// `branch` is the branch the since-date and not-on-branch queries run
    /// against. Since-date sources need both their flag and `leak_date`.
    pub fn change_sources(&self, branch: &str) -> Vec<ChangeSource> {
        let mut sources = Vec::new();
        if self.include_staged_files {
            sources.push(ChangeSource::StagedFiles);
        }
        if let Some(date) = self.leak_date {
            if self.include_unstaged_files {
                sources.push(ChangeSource::UnstagedAndStagedSinceDate {
                    branch: branch.to_string(),
                    date,
                });
            }
            if self.include_current_branch_committed_files {
                sources.push(ChangeSource::CommittedSinceDate {
                    branch: branch.to_string(),
                    date,
                });
            }
        }
        if self.include_all_current_branch_committed_files_not_in_master {
            sources.push(ChangeSource::CommittedNotOnBranch {
                branch: branch.to_string(),
            });
        }
        if !self.extra_files.is_empty() {
            sources.push(ChangeSource::ExplicitExtra {
                paths: self.extra_files.clone(),
            });
        }
        sources
    }
}

impl fmt::Debug for OrchestratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestratorOptions")
            .field("repo_path", &self.repo_path)
            .field("extra_files", &self.extra_files)
            .field("include_staged_files", &self.include_staged_files)
            .field("include_unstaged_files", &self.include_unstaged_files)
            .field(
                "include_current_branch_committed_files",
                &self.include_current_branch_committed_files,
            )
            .field(
                "include_all_current_branch_committed_files_not_in_master",
                &self.include_all_current_branch_committed_files_not_in_master,
            )
            .field("watch_included_files", &self.watch_included_files)
            .field("watch_files", &self.watch_files)
            .field("ignore_files_from_watch", &self.ignore_files_from_watch)
            .field("leak_date", &self.leak_date)
            .field("exclude_files", &self.exclude_files)
            .field("type_checker_config", &self.type_checker_config)
            .field("lint_config", &self.lint_config)
            .field("type_aware_lint", &self.type_aware_lint)
            .field("debounce", &self.debounce)
            .field("on_results", &self.on_results.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
