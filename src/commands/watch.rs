use std::path::PathBuf;

use anyhow::{Context, Result};

use tsratchet::application::WatchEvent;

use crate::cli::{LintArgs, ScopeArgs};
use crate::commands::session::{GlobalArgs, Session};
use crate::ui::json;
use crate::ui::views::run::render_run_report;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

/// Session-level watch settings from the command line
#[derive(Debug, Clone, Default)]
pub struct WatchArgs {
    pub debounce: Option<u64>,
    pub watch_dirs: Vec<PathBuf>,
    pub ignore: Vec<String>,
    pub no_watch_included: bool,
}

pub fn cmd_watch(
    global: &GlobalArgs,
    scope: &ScopeArgs,
    lint: &LintArgs,
    watch: &WatchArgs,
) -> Result<()> {
    let session = Session::open(global, |config| {
        scope.apply(config);
        lint.apply(config);
        if let Some(ms) = watch.debounce {
            config.watch.debounce_ms = ms;
        }
        config.watch.watch_files.extend(watch.watch_dirs.iter().cloned());
        config.watch.ignore.extend(watch.ignore.iter().cloned());
        if watch.no_watch_included {
            config.watch.watch_included_files = false;
        }
    })?;
    let ui = session.ui;

    let mut options = session.options();
    if !options.watch_enabled() {
        anyhow::bail!("nothing to watch: pass --watch-dir or drop --no-watch-included");
    }
    if !ui.json {
        options = options.on_results(move |result| {
            print!("{}", render_run_report(result, ui.verbose, ui.color, ui.unicode));
        });
    }

    let mut orchestrator = session.orchestrator(options)?;

    let stop = orchestrator.stop_handle();
    ctrlc::set_handler(move || stop.stop()).context("Error setting Ctrl+C handler")?;

    if !ui.json {
        print!(
            "{}",
            render_watch_header(&session.root_display(), ui.color, ui.unicode)
        );
    }

    orchestrator.watch(|event| {
        if ui.json {
            if let Err(e) = json::emit(&event.to_json()) {
                tracing::warn!(error = %e, "could not write watch event");
            }
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_watch_event(&timestamp, &event, ui.color, ui.unicode);
        match event {
            WatchEvent::Error { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    })?;

    Ok(())
}
