//! Watch event types

use crate::application::orchestrator::RunResult;

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        root: String,
        watching: Vec<String>,
        debounce_ms: u64,
    },
    /// Debounced batch of changed files that triggers a run
    FilesChanged { paths: Vec<String> },
    /// A run finished
    RunComplete {
        branch: String,
        files: usize,
        success: bool,
        lint_success: bool,
        check_success: bool,
        lint_errors: usize,
        type_errors: usize,
        warnings: usize,
    },
    /// A run failed before producing a result
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    pub fn run_complete(result: &RunResult) -> Self {
        WatchEvent::RunComplete {
            branch: result.branch.clone(),
            files: result.scope_files.len(),
            success: result.success,
            lint_success: result.lint_success,
            check_success: result.check_success,
            lint_errors: result.lint.as_ref().map(|l| l.total_errors()).unwrap_or(0),
            type_errors: result.check.as_ref().map(|c| c.diagnostics.len()).unwrap_or(0),
            warnings: result.warnings.len(),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
