//! Incremental check engine
//!
//! Owns the checker's persistent builder for the life of the process. Each
//! `create_program` hands the previous builder back to the checker so
//! unchanged files keep their analysis; `check` narrows the checker's
//! diagnostics to the files of the most recent program.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::ports::{Diagnostic, ProgramHandle, TypeChecker};
use crate::domain::value_objects::{normalize_root, CompilerOptions, RepoPath};
use crate::error::{RatchetError, RatchetResult};

/// Type-check verdict for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Formatted in-scope diagnostics, empty on success
    pub diagnostics_text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub success: bool,
}

impl CheckOutcome {
    /// Diagnostics attributed to `file`
    pub fn count_for(&self, file: &Path) -> usize {
        let wanted = RepoPath::from_path(file);
        self.diagnostics
            .iter()
            .filter(|d| d.file.as_deref().map(RepoPath::from_path).as_ref() == Some(&wanted))
            .count()
    }
}

pub struct IncrementalCheckEngine<C: TypeChecker> {
    checker: C,
    options: CompilerOptions,
    cwd: PathBuf,
    builder: Option<C::Builder>,
    scope: HashSet<RepoPath>,
}

impl<C: TypeChecker> IncrementalCheckEngine<C> {
    /// `cwd` is where formatted paths are shown relative to
    pub fn new(checker: C, options: CompilerOptions, cwd: impl AsRef<Path>) -> Self {
        Self {
            checker,
            options,
            cwd: normalize_root(cwd.as_ref()),
            builder: None,
            scope: HashSet::new(),
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// True once a program has been built
    pub fn is_ready(&self) -> bool {
        self.builder.is_some()
    }

    /// Build the program for `files`, reusing the previous builder
    ///
    /// On failure the previous state is gone and the engine is back to
    /// uninitialized; the next call starts from scratch.
    pub fn create_program(&mut self, files: &[PathBuf]) -> RatchetResult<Option<ProgramHandle>> {
        let started = Instant::now();
        let previous = self.builder.take();
        let reused = previous.is_some();
        self.scope.clear();

        let builder = self.checker.build(files, &self.options, previous)?;
        self.scope = files.iter().map(|f| RepoPath::from_path(f)).collect();
        let handle = self.checker.program(&builder);
        self.builder = Some(builder);

        debug!(
            files = files.len(),
            reused,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "program created"
        );
        Ok(handle)
    }

    /// Handle of the current program, if any
    pub fn program(&self) -> Option<ProgramHandle> {
        self.builder.as_ref().and_then(|b| self.checker.program(b))
    }

    /// Emit, collect diagnostics, and keep only those in the current scope
    pub fn check(&mut self) -> RatchetResult<CheckOutcome> {
        let started = Instant::now();
        let builder = self.builder.as_mut().ok_or(RatchetError::EngineMisuse)?;

        let mut all = self.checker.emit(builder)?;
        all.extend(self.checker.pre_emit_diagnostics(builder)?);

        let total = all.len();
        let mut global = 0usize;
        let diagnostics: Vec<Diagnostic> = all
            .into_iter()
            .filter(|d| match &d.file {
                Some(file) => self.scope.contains(&RepoPath::from_path(file)),
                None => {
                    global += 1;
                    false
                }
            })
            .collect();

        if global > 0 {
            warn!(count = global, "dropping diagnostics not attached to a file");
        }
        debug!(
            total,
            in_scope = diagnostics.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "type check finished"
        );

        let diagnostics_text = self.checker.format_diagnostics(&diagnostics, &self.cwd);
        Ok(CheckOutcome {
            success: diagnostics.is_empty(),
            diagnostics_text,
            diagnostics,
        })
    }
}
