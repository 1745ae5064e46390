//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{OrchestratorOptions, DEBOUNCE_MS};
use crate::domain::ports::LintConfig;
use crate::domain::value_objects::{
    CompilerOptions, CutoverDate, PermittedCompilerOptions, RepoPath,
};

/// Which change sources feed the scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Files newly added to the index
    #[serde(default = "default_true")]
    pub staged: bool,

    /// Working-tree changes to files added since `leak_date`, plus new files
    #[serde(default)]
    pub unstaged: bool,

    /// Files added on the current branch since `leak_date`
    #[serde(default)]
    pub committed_since_leak_date: bool,

    /// Files in commits that exist on no other branch or remote
    #[serde(default)]
    pub committed_not_on_other_branches: bool,

    /// Cutover date: unix seconds, RFC 3339, or YYYY-MM-DD
    #[serde(default)]
    pub leak_date: Option<CutoverDate>,

    #[serde(default)]
    pub extra_files: Vec<String>,

    #[serde(default)]
    pub exclude_files: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            staged: true,
            unstaged: false,
            committed_since_leak_date: false,
            committed_not_on_other_branches: false,
            leak_date: None,
            extra_files: Vec::new(),
            exclude_files: Vec::new(),
        }
    }
}

/// Type-checker configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCheckerConfig {
    /// Explicit `tsc` executable (default: node_modules/.bin, then PATH)
    #[serde(default)]
    pub tsc: Option<PathBuf>,

    /// Overridable compiler options; strictness flags are always forced
    #[serde(default)]
    pub compiler_options: PermittedCompilerOptions,
}

/// Lint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintSection {
    /// Explicit `eslint` executable (default: node_modules/.bin, then PATH)
    #[serde(default)]
    pub eslint: Option<PathBuf>,

    /// Share the type-checker's program for type-aware rules
    #[serde(default = "default_true")]
    pub type_aware: bool,

    /// ESLint config object the run is based on
    #[serde(default)]
    pub base_config: LintConfig,
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            eslint: None,
            type_aware: true,
            base_config: LintConfig::default(),
        }
    }
}

/// Watch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period before a burst of changes triggers a run
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Directories watched for the whole session, relative to the repo
    #[serde(default)]
    pub watch_files: Vec<PathBuf>,

    /// Gitignore-style globs for events to drop
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Watch scope files individually, re-registered around each run
    #[serde(default = "default_true")]
    pub watch_included_files: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            watch_files: Vec::new(),
            ignore: Vec::new(),
            watch_included_files: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEBOUNCE_MS
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure (`tsratchet.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Repository root; defaults to the directory the config was found in
    #[serde(default)]
    pub repo: Option<PathBuf>,

    #[serde(default)]
    pub scope: ScopeConfig,

    #[serde(default)]
    pub type_checker: TypeCheckerConfig,

    #[serde(default)]
    pub lint: LintSection,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Composed compiler options (defaults, overrides, forced flags)
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions::new(self.type_checker.compiler_options.clone())
    }

    /// Orchestrator options for a repository at `repo_path`
    ///
    /// The result callback is left unset; commands install their own.
    pub fn orchestrator_options(&self, repo_path: &Path) -> OrchestratorOptions {
        OrchestratorOptions {
            extra_files: self.scope.extra_files.iter().map(RepoPath::new).collect(),
            include_staged_files: self.scope.staged,
            include_unstaged_files: self.scope.unstaged,
            include_current_branch_committed_files: self.scope.committed_since_leak_date,
            include_all_current_branch_committed_files_not_in_master: self
                .scope
                .committed_not_on_other_branches,
            watch_included_files: self.watch.watch_included_files,
            watch_files: self.watch.watch_files.clone(),
            ignore_files_from_watch: self.watch.ignore.clone(),
            leak_date: self.scope.leak_date,
            exclude_files: self.scope.exclude_files.iter().map(RepoPath::new).collect(),
            type_checker_config: self.compiler_options(),
            lint_config: self.lint.base_config.clone(),
            type_aware_lint: self.lint.type_aware,
            debounce: Duration::from_millis(self.watch.debounce_ms),
            ..OrchestratorOptions::new(repo_path)
        }
    }
}
