use anyhow::Result;

use crate::cli::ScopeArgs;
use crate::commands::session::{GlobalArgs, Session};
use crate::ui::json;
use crate::ui::views::scope::render_scope_preview;

/// Resolve and print the scope; succeeds unless the guard would fail
pub fn cmd_scope(global: &GlobalArgs, scope: &ScopeArgs) -> Result<bool> {
    let session = Session::open(global, |config| scope.apply(config))?;
    let ui = session.ui;
    let orchestrator = session.orchestrator(session.options())?;

    let preview = match orchestrator.preview() {
        Ok(preview) => preview,
        Err(err) => {
            if ui.json {
                json::emit(&json::error_event("scope", &err.to_string()))?;
            }
            return Err(err.into());
        }
    };

    if ui.json {
        let mut value = serde_json::to_value(&preview)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("scope"));
            obj.insert("event".to_string(), serde_json::json!("scope"));
        }
        json::emit(&value.to_string())?;
    } else {
        print!(
            "{}",
            render_scope_preview(&session.root_display(), &preview, ui.color, ui.unicode)
        );
    }

    Ok(preview.guard.success)
}
