//! Lint adapter
//!
//! Runs the lint engine over the same files the checker sees and reduces
//! the report to a verdict.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{LintConfig, LintEngine, LintFileResult, LintReport, ProgramHandle};
use crate::domain::value_objects::RepoPath;
use crate::error::RatchetResult;

/// Lint verdict for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintOutcome {
    pub results: Vec<LintFileResult>,
    /// Stylish report, empty when clean
    pub formatted: String,
    /// No file has an error (warnings do not fail)
    pub success: bool,
}

impl LintOutcome {
    pub fn from_report(report: LintReport) -> Self {
        let success = report.results.iter().all(|r| r.error_count == 0);
        Self {
            results: report.results,
            formatted: report.formatted,
            success,
        }
    }

    /// Error count per file, in report order
    pub fn error_counts(&self) -> Vec<usize> {
        self.results.iter().map(|r| r.error_count).collect()
    }

    pub fn total_errors(&self) -> usize {
        self.results.iter().map(|r| r.error_count).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.results.iter().map(|r| r.warning_count).sum()
    }

    pub fn result_for(&self, file: &Path) -> Option<&LintFileResult> {
        let wanted = RepoPath::from_path(file);
        self.results
            .iter()
            .find(|r| RepoPath::from_path(&r.file) == wanted)
    }
}

pub struct LintAdapter<L: LintEngine> {
    engine: L,
    config: LintConfig,
    type_aware: bool,
}

impl<L: LintEngine> LintAdapter<L> {
    pub fn new(engine: L, config: LintConfig) -> Self {
        Self {
            engine,
            config,
            type_aware: true,
        }
    }

    /// Whether to share the checker's program for type-aware rules (default on)
    pub fn with_type_aware(mut self, type_aware: bool) -> Self {
        self.type_aware = type_aware;
        self
    }

    pub fn engine(&self) -> &L {
        &self.engine
    }

    pub fn lint(&mut self, files: &[PathBuf], program: Option<&ProgramHandle>) -> RatchetResult<LintOutcome> {
        let started = Instant::now();
        let program = if self.type_aware { program } else { None };
        let report = self.engine.lint(files, &self.config, program)?;
        let outcome = LintOutcome::from_report(report);
        debug!(
            files = files.len(),
            errors = outcome.total_errors(),
            warnings = outcome.total_warnings(),
            type_aware = program.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lint finished"
        );
        Ok(outcome)
    }
}
