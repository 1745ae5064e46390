//! Run Result
//!
//! Snapshot of one orchestrated run. Built once per run and never mutated
//! afterwards.

use serde::Serialize;

use crate::application::engine::CheckOutcome;
use crate::application::lint::LintOutcome;
use crate::domain::services::GuardReport;
use crate::domain::value_objects::RepoPath;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Branch the scope was resolved against
    pub branch: String,
    /// Files that were linted and type-checked, relative to the root
    pub scope_files: Vec<RepoPath>,
    pub guard: GuardReport,
    /// Absent when nothing was linted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<LintOutcome>,
    /// Absent when nothing was type-checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckOutcome>,
    pub lint_success: bool,
    pub check_success: bool,
    pub success: bool,
    /// Staged-source files that were handed back to the index
    pub staged: Vec<RepoPath>,
    /// Non-fatal problems (e.g. restaging failed); never affect `success`
    pub warnings: Vec<String>,
}

impl RunResult {
    /// Guard rejected the scope; nothing was compiled or linted
    pub fn guard_failed(branch: impl Into<String>, guard: GuardReport) -> Self {
        Self {
            branch: branch.into(),
            scope_files: Vec::new(),
            guard,
            lint: None,
            check: None,
            lint_success: false,
            check_success: false,
            success: false,
            staged: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Nothing in scope; trivially successful
    pub fn empty(branch: impl Into<String>, guard: GuardReport) -> Self {
        Self {
            branch: branch.into(),
            scope_files: Vec::new(),
            guard,
            lint: None,
            check: None,
            lint_success: true,
            check_success: true,
            success: true,
            staged: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Verdict of a full run; `success` requires both lint and check to pass
    pub fn checked(
        branch: impl Into<String>,
        scope_files: Vec<RepoPath>,
        guard: GuardReport,
        lint: LintOutcome,
        check: CheckOutcome,
    ) -> Self {
        let lint_success = lint.success;
        let check_success = check.success;
        Self {
            branch: branch.into(),
            scope_files,
            guard,
            lint: Some(lint),
            check: Some(check),
            lint_success,
            check_success,
            success: lint_success && check_success,
            staged: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_staging(mut self, staged: Vec<RepoPath>, warnings: Vec<String>) -> Self {
        self.staged = staged;
        self.warnings = warnings;
        self
    }

    /// True when the guard stopped the run
    pub fn is_guard_failure(&self) -> bool {
        !self.guard.success
    }

    /// Lint error count per scope file, in lint order
    pub fn lint_error_counts(&self) -> Vec<usize> {
        self.lint
            .as_ref()
            .map(|l| l.error_counts())
            .unwrap_or_default()
    }

    pub fn type_error_count(&self) -> usize {
        self.check.as_ref().map(|c| c.diagnostics.len()).unwrap_or(0)
    }

    /// Convert to JSON with "command" and "event" fields, like the other reports
    pub fn to_json(&self, command: &str) -> String {
        let mut value = serde_json::to_value(self)
            .unwrap_or_else(|_| serde_json::json!({"success": self.success}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
            obj.insert("event".to_string(), serde_json::json!("result"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Scope of a run as it would be checked, without checking it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopePreview {
    pub branch: String,
    /// Labels of the change sources that were evaluated, in order
    pub sources: Vec<String>,
    /// Every resolved file, before extension filtering
    pub candidates: Vec<RepoPath>,
    /// The subset that would be linted and type-checked
    pub checkable: Vec<RepoPath>,
    pub guard: GuardReport,
}
