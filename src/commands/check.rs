use anyhow::Result;

use crate::cli::{LintArgs, ScopeArgs};
use crate::commands::session::{GlobalArgs, Session};
use crate::ui::json;
use crate::ui::views::run::{render_check_header, render_run_report};

/// Single run; returns the verdict so `main` can pick the exit code
pub fn cmd_check(global: &GlobalArgs, scope: &ScopeArgs, lint: &LintArgs) -> Result<bool> {
    let session = Session::open(global, |config| {
        scope.apply(config);
        lint.apply(config);
    })?;
    let ui = session.ui;
    let mut orchestrator = session.orchestrator(session.options())?;

    if !ui.json {
        let sources = orchestrator.options().change_sources("HEAD");
        let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
        print!(
            "{}",
            render_check_header(&session.root_display(), &labels, ui.color, ui.unicode)
        );
        println!();
    }

    let result = match orchestrator.run() {
        Ok(result) => result,
        Err(err) => {
            if ui.json {
                json::emit(&json::error_event("check", &err.to_string()))?;
            }
            return Err(err.into());
        }
    };

    if ui.json {
        json::emit(&result.to_json("check"))?;
    } else {
        print!(
            "{}",
            render_run_report(&result, ui.verbose, ui.color, ui.unicode)
        );
    }

    Ok(result.success)
}
