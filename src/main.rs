//! tsratchet CLI - strict type-check and lint enforcement, file by file
//!
//! Usage: tsratchet <COMMAND>
//!
//! Commands:
//!   check   Type-check and lint the files in scope once
//!   watch   Check once, then again on every change
//!   scope   Show which files a check would cover

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{cmd_check, cmd_scope, cmd_watch, GlobalArgs, WatchArgs};

/// Overrides the `-v` level with a full filter directive
const LOG_ENV: &str = "TSRATCHET_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalArgs::from(&cli);
    let success = match &cli.command {
        Commands::Check { scope, lint } => cmd_check(&global, scope, lint)?,
        Commands::Watch {
            scope,
            lint,
            debounce,
            watch_dirs,
            ignore,
            no_watch_included,
        } => {
            let watch = WatchArgs {
                debounce: *debounce,
                watch_dirs: watch_dirs.clone(),
                ignore: ignore.clone(),
                no_watch_included: *no_watch_included,
            };
            cmd_watch(&global, scope, lint, &watch)?;
            true
        }
        Commands::Scope { scope } => cmd_scope(&global, scope)?,
    };

    if !success {
        std::io::Write::flush(&mut std::io::stdout())?;
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ui::terminal::stderr_is_tty())
        .with_target(false)
        .try_init();
}
