//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --repo, --config) are inherited
//! by every subcommand. Scope flags override the `[scope]` section of the
//! config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tsratchet::config::Config;
use tsratchet::domain::value_objects::CutoverDate;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// tsratchet - strict type-check and lint only the files you touched
#[derive(Parser, Debug)]
#[command(name = "tsratchet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// When to use colors
    #[arg(long, value_enum, global = true, value_name = "WHEN")]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Repository root (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Config file (default: tsratchet.toml in the repository root)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which files enter the scope
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ScopeArgs {
    /// Skip files newly added to the index
    #[arg(long)]
    pub no_staged: bool,

    /// Include working-tree changes to files added since the leak date
    #[arg(long)]
    pub unstaged: bool,

    /// Include files added on this branch since the leak date
    #[arg(long)]
    pub committed: bool,

    /// Include files from commits that exist on no other branch or remote
    #[arg(long)]
    pub branch_only: bool,

    /// Cutover date: YYYY-MM-DD, RFC 3339, or unix seconds
    #[arg(long, value_name = "DATE")]
    pub leak_date: Option<CutoverDate>,

    /// Always check this file (repeatable)
    #[arg(long = "extra", value_name = "FILE")]
    pub extra_files: Vec<String>,

    /// Never check this file (repeatable)
    #[arg(long = "exclude", value_name = "FILE")]
    pub exclude_files: Vec<String>,
}

impl ScopeArgs {
    /// Layer the flags over a loaded config; unset flags keep the config's value
    pub fn apply(&self, config: &mut Config) {
        let scope = &mut config.scope;
        if self.no_staged {
            scope.staged = false;
        }
        scope.unstaged |= self.unstaged;
        scope.committed_since_leak_date |= self.committed;
        scope.committed_not_on_other_branches |= self.branch_only;
        if let Some(date) = self.leak_date {
            scope.leak_date = Some(date);
        }
        scope.extra_files.extend(self.extra_files.iter().cloned());
        scope.exclude_files.extend(self.exclude_files.iter().cloned());
    }
}

/// Lint behavior shared by `check` and `watch`
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LintArgs {
    /// Lint without the type-checker's program (faster, no type-aware rules)
    #[arg(long)]
    pub no_type_aware: bool,
}

impl LintArgs {
    pub fn apply(&self, config: &mut Config) {
        if self.no_type_aware {
            config.lint.type_aware = false;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Type-check and lint the files in scope once
    Check {
        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        lint: LintArgs,
    },

    /// Check once, then again on every change
    Watch {
        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        lint: LintArgs,

        /// Quiet period before a burst of changes triggers a run
        #[arg(long, value_name = "MS")]
        debounce: Option<u64>,

        /// Also watch this directory for the whole session (repeatable)
        #[arg(long = "watch-dir", value_name = "DIR")]
        watch_dirs: Vec<PathBuf>,

        /// Ignore events for paths matching this glob (repeatable)
        #[arg(long, value_name = "GLOB")]
        ignore: Vec<String>,

        /// Do not subscribe to the files in scope individually
        #[arg(long)]
        no_watch_included: bool,
    },

    /// Show which files a check would cover, without checking them
    Scope {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}
