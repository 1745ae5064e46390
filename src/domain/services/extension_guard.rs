//! Extension guard
//!
//! Files entering the migration must already be renamed to a typed
//! extension. Any legacy `.js`-family file in scope fails the run before
//! anything is compiled.

use serde::Serialize;

use crate::domain::value_objects::{RepoPath, SourceKind};

/// A file that may not be part of the migrated scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardViolation {
    pub file: RepoPath,
    pub reason: String,
}

/// Outcome of an extension check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardReport {
    pub success: bool,
    pub violations: Vec<GuardViolation>,
    /// Human-readable summary, empty on success
    pub message: String,
}

pub struct ExtensionGuard;

impl ExtensionGuard {
    /// Flag every legacy-extension file outside vendored directories
    pub fn check(files: &[RepoPath]) -> GuardReport {
        let violations: Vec<GuardViolation> = files
            .iter()
            .filter(|file| {
                SourceKind::of(file) == SourceKind::LegacyJavaScript
                    && !SourceKind::is_vendored(file)
            })
            .map(|file| GuardViolation {
                file: file.clone(),
                reason: format!(
                    "use a .ts/.tsx extension instead of .{}",
                    file.extension().unwrap_or("js")
                ),
            })
            .collect();

        let message = violations
            .iter()
            .map(|v| format!("Please use .ts(x) extension instead of .js(x)\n{}", v.file))
            .collect::<Vec<_>>()
            .join("\n\n");

        GuardReport {
            success: violations.is_empty(),
            violations,
            message,
        }
    }
}
