//! LintEngine port - external rule evaluation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProgramHandle;
use crate::error::RatchetResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Warning,
    Error,
}

/// One rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintMessage {
    pub line: u32,
    pub column: u32,
    pub severity: LintSeverity,
    pub message: String,
    pub rule_id: Option<String>,
}

/// Per-file lint outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFileResult {
    pub file: PathBuf,
    pub error_count: usize,
    pub warning_count: usize,
    pub messages: Vec<LintMessage>,
}

impl LintFileResult {
    pub fn clean(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            error_count: 0,
            warning_count: 0,
            messages: Vec::new(),
        }
    }
}

/// Everything the engine produced for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// One entry per linted file, in input order
    pub results: Vec<LintFileResult>,
    /// Formatted report (stylish)
    pub formatted: String,
}

/// Base configuration handed to the engine verbatim
///
/// The engine's own config discovery is always disabled; this object is the
/// only configuration it sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintConfig(pub Value);

impl Default for LintConfig {
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

/// Abstract lint engine interface
///
/// Implementations:
/// - `EslintEngine` - `eslint` subprocess with JSON output
/// - in-memory fakes for testing
pub trait LintEngine {
    /// Lint `files`; `program` enables type-aware rules when present
    fn lint(
        &mut self,
        files: &[PathBuf],
        config: &LintConfig,
        program: Option<&ProgramHandle>,
    ) -> RatchetResult<LintReport>;
}
