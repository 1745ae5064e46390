use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use tsratchet::application::{Orchestrator, OrchestratorOptions};
use tsratchet::config::{self, Config};
use tsratchet::infrastructure::{resolve_node_bin, EslintEngine, GitCli, TscChecker};

use crate::cli::{Cli, ColorWhen};
use crate::commands::project_root::discover_repo_root;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// The orchestrator wired to the real tools
pub type CliOrchestrator = Orchestrator<GitCli, TscChecker, EslintEngine>;

/// Everything a command needs before it starts
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub ui: UiContext,
}

/// Global flags, detached from the parsed subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub repo: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl From<&Cli> for GlobalArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            color: cli.color,
            repo: cli.repo.clone(),
            config: cli.config.clone(),
        }
    }
}

impl Session {
    /// Locate the repository, load its config and let the command's flags
    /// adjust it
    pub fn open(global: &GlobalArgs, adjust: impl FnOnce(&mut Config)) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read the current directory")?;
        let start = match &global.repo {
            Some(repo) => cwd.join(repo),
            None => discover_repo_root(&cwd),
        };

        let loaded = config::load(&start, global.config.as_deref())?;
        let mut config = loaded.config;
        adjust(&mut config);

        let root = match (&global.repo, &config.repo) {
            (None, Some(repo)) => start.join(repo),
            _ => start,
        };
        if !root.is_dir() {
            anyhow::bail!("repository root {} is not a directory", root.display());
        }

        let ui = UiContext::new(global.json, global.verbose, global.color, config.output.color);
        if !loaded.warnings.is_empty() && !ui.json {
            print_config_warnings(&loaded.warnings, ui.color, ui.unicode);
        }
        debug!(root = %root.display(), config = ?loaded.path, "session ready");

        Ok(Self { root, config, ui })
    }

    pub fn options(&self) -> OrchestratorOptions {
        self.config.orchestrator_options(&self.root)
    }

    /// Build the orchestrator over git, tsc and eslint
    pub fn orchestrator(&self, options: OrchestratorOptions) -> Result<CliOrchestrator> {
        let tsc = resolve_node_bin(self.config.type_checker.tsc.as_deref(), &self.root, "tsc");
        let eslint = resolve_node_bin(self.config.lint.eslint.as_deref(), &self.root, "eslint");
        debug!(tsc = %tsc.display(), eslint = %eslint.display(), "resolved tools");

        let checker = TscChecker::new(tsc, &self.root)?;
        let linter = EslintEngine::new(eslint, &self.root)?;
        Ok(Orchestrator::new(options, GitCli::new(&self.root), checker, linter))
    }

    pub fn root_display(&self) -> String {
        self.root.display().to_string()
    }
}
