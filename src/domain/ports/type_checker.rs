//! TypeChecker port - incremental semantic analysis
//!
//! The checker owns no state between calls; whatever it needs to reuse
//! lives in the `Builder` it hands back, which the engine passes in again
//! on the next build.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::CompilerOptions;
use crate::error::RatchetResult;

/// Diagnostic severity as reported by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        f.write_str(label)
    }
}

/// A single type-checker diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source file, absent for global (options/config) diagnostics
    pub file: Option<PathBuf>,
    /// 1-indexed
    pub line: u32,
    /// 1-indexed
    pub column: u32,
    pub category: DiagnosticCategory,
    /// Numeric checker code, e.g. `2322`
    pub code: u32,
    /// Flattened message, continuation lines joined with `\n`
    pub message: String,
}

impl Diagnostic {
    pub fn error(file: impl Into<PathBuf>, line: u32, column: u32, code: u32, message: &str) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
            category: DiagnosticCategory::Error,
            code,
            message: message.to_string(),
        }
    }
}

/// What a lint engine needs to reuse the checker's program for type-aware rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramHandle {
    /// Project file describing the program (compiler options + root files)
    pub project: PathBuf,
    pub roots: Vec<PathBuf>,
}

/// Abstract type-checker interface
///
/// Implementations:
/// - `TscChecker` - `tsc` subprocess with a generated project file
/// - in-memory fakes for testing
pub trait TypeChecker {
    /// Persistent analysis state carried across builds
    type Builder;

    /// Build (or rebuild) a program for `roots`, reusing `previous` where possible
    fn build(
        &mut self,
        roots: &[PathBuf],
        options: &CompilerOptions,
        previous: Option<Self::Builder>,
    ) -> RatchetResult<Self::Builder>;

    /// Emit the program; returns emit-phase diagnostics
    fn emit(&mut self, builder: &mut Self::Builder) -> RatchetResult<Vec<Diagnostic>>;

    /// Syntactic, semantic and global diagnostics collected before emit
    fn pre_emit_diagnostics(&mut self, builder: &mut Self::Builder)
        -> RatchetResult<Vec<Diagnostic>>;

    /// Human-readable rendering, paths shown relative to `cwd`
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], cwd: &Path) -> String;

    /// Handle for sharing the program with a lint engine
    fn program(&self, builder: &Self::Builder) -> Option<ProgramHandle>;
}
