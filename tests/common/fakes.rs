//! In-memory collaborators for orchestrator tests.
//!
//! The checker and linter read the files they are given and count marker
//! lines, so a test controls the verdict by editing file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tsratchet::domain::ports::{
    Diagnostic, LintConfig, LintEngine, LintFileResult, LintMessage, LintReport, LintSeverity,
    ProgramHandle, StatusEntry, TypeChecker, VersionControl,
};
use tsratchet::domain::services::format_diagnostics;
use tsratchet::domain::value_objects::{CompilerOptions, CutoverDate, RepoPath};
use tsratchet::RatchetResult;

/// A line containing this counts as one type error
pub const TYPE_ERROR: &str = "@type-error";
/// A line containing this counts as one lint error
pub const LINT_ERROR: &str = "@lint-error";

fn marker_lines(file: &Path, marker: &str) -> Vec<u32> {
    fs::read_to_string(file)
        .unwrap_or_default()
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(marker))
        .map(|(i, _)| i as u32 + 1)
        .collect()
}

/// Version control with a fixed branch and fixed source answers
#[derive(Clone, Default)]
pub struct StaticVcs {
    /// Shared so a test can change the staged set while a watch runs
    pub staged: Arc<Mutex<Vec<RepoPath>>>,
    /// Every `stage` call, shared so tests can inspect it after moving the fake
    pub stage_calls: Arc<Mutex<Vec<Vec<RepoPath>>>>,
}

impl StaticVcs {
    pub fn with_staged(paths: &[&str]) -> Self {
        let vcs = Self::default();
        vcs.set_staged(paths);
        vcs
    }

    pub fn set_staged(&self, paths: &[&str]) {
        *self.staged.lock().unwrap() = paths.iter().map(RepoPath::new).collect();
    }
}

impl VersionControl for StaticVcs {
    fn current_branch(&self) -> RatchetResult<String> {
        Ok("main".to_string())
    }

    fn staged_new_files(&self) -> RatchetResult<Vec<RepoPath>> {
        Ok(self.staged.lock().unwrap().clone())
    }

    fn files_committed_since(&self, _: &str, _: &CutoverDate) -> RatchetResult<Vec<RepoPath>> {
        Ok(Vec::new())
    }

    fn files_in_commits_not_on_other_branches(&self, _: &str) -> RatchetResult<Vec<RepoPath>> {
        Ok(Vec::new())
    }

    fn status(&self) -> RatchetResult<Vec<StatusEntry>> {
        Ok(Vec::new())
    }

    fn stage(&self, paths: &[RepoPath]) -> RatchetResult<()> {
        self.stage_calls.lock().unwrap().push(paths.to_vec());
        Ok(())
    }
}

/// Type checker that reports one TS2322 per `@type-error` line
#[derive(Default)]
pub struct MarkerChecker {
    pub builds: usize,
}

pub struct MarkerBuilder {
    roots: Vec<PathBuf>,
}

impl TypeChecker for MarkerChecker {
    type Builder = MarkerBuilder;

    fn build(
        &mut self,
        roots: &[PathBuf],
        _: &CompilerOptions,
        _: Option<MarkerBuilder>,
    ) -> RatchetResult<MarkerBuilder> {
        self.builds += 1;
        Ok(MarkerBuilder {
            roots: roots.to_vec(),
        })
    }

    fn emit(&mut self, _: &mut MarkerBuilder) -> RatchetResult<Vec<Diagnostic>> {
        Ok(Vec::new())
    }

    fn pre_emit_diagnostics(&mut self, builder: &mut MarkerBuilder) -> RatchetResult<Vec<Diagnostic>> {
        Ok(builder
            .roots
            .iter()
            .flat_map(|root| {
                marker_lines(root, TYPE_ERROR).into_iter().map(move |line| {
                    Diagnostic::error(
                        root,
                        line,
                        1,
                        2322,
                        "Type 'string' is not assignable to type 'number'.",
                    )
                })
            })
            .collect())
    }

    fn format_diagnostics(&self, diagnostics: &[Diagnostic], cwd: &Path) -> String {
        format_diagnostics(diagnostics, cwd)
    }

    fn program(&self, builder: &MarkerBuilder) -> Option<ProgramHandle> {
        Some(ProgramHandle {
            project: PathBuf::from("tsconfig.generated.json"),
            roots: builder.roots.clone(),
        })
    }
}

/// Lint engine that reports one error per `@lint-error` line
#[derive(Default)]
pub struct MarkerLinter {
    pub calls: usize,
}

impl LintEngine for MarkerLinter {
    fn lint(
        &mut self,
        files: &[PathBuf],
        _: &LintConfig,
        _: Option<&ProgramHandle>,
    ) -> RatchetResult<LintReport> {
        self.calls += 1;
        let results = files
            .iter()
            .map(|file| {
                let messages: Vec<LintMessage> = marker_lines(file, LINT_ERROR)
                    .into_iter()
                    .map(|line| LintMessage {
                        line,
                        column: 1,
                        severity: LintSeverity::Error,
                        message: "Unexpected var, use let or const instead.".to_string(),
                        rule_id: Some("no-var".to_string()),
                    })
                    .collect();
                LintFileResult {
                    file: file.clone(),
                    error_count: messages.len(),
                    warning_count: 0,
                    messages,
                }
            })
            .collect();
        Ok(LintReport {
            results,
            formatted: String::new(),
        })
    }
}

/// Marker linter that appends a `@lint-error` line to every file it lints
/// on call number `edit_on_call`, after reading them
///
/// Stands in for a developer saving while a run is in flight.
pub struct MidRunEditLinter {
    pub inner: MarkerLinter,
    pub edit_on_call: usize,
}

impl MidRunEditLinter {
    pub fn editing_on_call(edit_on_call: usize) -> Self {
        Self {
            inner: MarkerLinter::default(),
            edit_on_call,
        }
    }
}

impl LintEngine for MidRunEditLinter {
    fn lint(
        &mut self,
        files: &[PathBuf],
        config: &LintConfig,
        program: Option<&ProgramHandle>,
    ) -> RatchetResult<LintReport> {
        let report = self.inner.lint(files, config, program)?;
        if self.inner.calls == self.edit_on_call {
            for file in files {
                let mut content = fs::read_to_string(file).unwrap_or_default();
                content.push_str(&format!("var late = 1; // {}\n", LINT_ERROR));
                fs::write(file, content).unwrap();
            }
        }
        Ok(report)
    }
}

/// `count` marker lines followed by a trailing statement
pub fn source_with(marker: &str, count: usize) -> String {
    let mut content = String::new();
    for i in 0..count {
        content.push_str(&format!("var v{} = {}; // {}\n", i, i, marker));
    }
    content.push_str("export {};\n");
    content
}
