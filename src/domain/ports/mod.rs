//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod lint_engine;
pub mod type_checker;
pub mod version_control;

pub use lint_engine::{
    LintConfig, LintEngine, LintFileResult, LintMessage, LintReport, LintSeverity,
};
pub use type_checker::{Diagnostic, DiagnosticCategory, ProgramHandle, TypeChecker};
pub use version_control::{StatusEntry, VersionControl, WorkingChange};
