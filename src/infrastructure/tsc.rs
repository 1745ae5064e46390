//! `tsc` adapter for the `TypeChecker` port
//!
//! Each build writes a generated project file listing the root files and the
//! composed compiler options. The incremental state is the compiler's own
//! build-info file; handing the previous builder back keeps that file, so
//! unchanged files are not re-analyzed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::{json, Value};
use tempfile::TempDir;
use tracing::{debug, warn};

use super::process::{run_tool, tool_workdir};
use crate::domain::ports::{Diagnostic, DiagnosticCategory, ProgramHandle, TypeChecker};
use crate::domain::services::format_diagnostics;
use crate::domain::value_objects::{normalize_root, CompilerOptions, RepoPath};
use crate::error::{RatchetError, RatchetResult};

const PROJECT_FILE: &str = "tsconfig.tsratchet.json";
const BUILD_INFO_FILE: &str = "tsratchet.tsbuildinfo";

/// Persistent state for one program
#[derive(Debug)]
pub struct TscBuilder {
    project: PathBuf,
    build_info: PathBuf,
    roots: Vec<PathBuf>,
    generation: u64,
    diagnostics: Option<Vec<Diagnostic>>,
}

impl TscBuilder {
    /// How many builds this state has survived (1 for a fresh program)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

pub struct TscChecker {
    tsc: PathBuf,
    cwd: PathBuf,
    /// `cwd` with symlinks resolved; tsc reports paths relative to this
    physical_cwd: PathBuf,
    workdir: TempDir,
}

impl TscChecker {
    /// `cwd` is the repository root; relative paths in output resolve against it
    pub fn new(tsc: impl Into<PathBuf>, cwd: impl AsRef<Path>) -> RatchetResult<Self> {
        let cwd = normalize_root(cwd.as_ref());
        let workdir = tool_workdir(&cwd, "tsc-")?;
        let physical_cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.clone());
        Ok(Self {
            tsc: tsc.into(),
            cwd,
            physical_cwd,
            workdir,
        })
    }

    pub fn project_path(&self) -> PathBuf {
        self.workdir.path().join(PROJECT_FILE)
    }

    fn render_project(&self, roots: &[PathBuf], options: &CompilerOptions, build_info: &Path) -> Value {
        let mut compiler_options = options.to_json();
        if let Some(map) = compiler_options.as_object_mut() {
            // the project file lives outside the root; anchor relative baseUrl to the repo
            if let Some(Value::String(base)) = map.get("baseUrl") {
                if Path::new(base).is_relative() {
                    let anchored = self.cwd.join(base).to_string_lossy().into_owned();
                    map.insert("baseUrl".into(), json!(anchored));
                }
            }
            // automatic @types lookup starts at the project file; start it at the repo
            map.insert("typeRoots".into(), json!(self.type_roots()));
            map.insert("incremental".into(), json!(true));
            map.insert(
                "tsBuildInfoFile".into(),
                json!(build_info.to_string_lossy()),
            );
        }

        let files: Vec<String> = roots
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        json!({
            "compilerOptions": compiler_options,
            "files": files,
        })
    }

    /// Every existing `node_modules/@types` from the repo root upwards
    fn type_roots(&self) -> Vec<String> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join("node_modules").join("@types"))
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.to_string_lossy().into_owned())
            .collect()
    }

    /// Re-express a diagnostic under the root the caller gave us
    fn to_logical(&self, mut diagnostic: Diagnostic) -> Diagnostic {
        if let Some(file) = diagnostic.file.take() {
            let normalized = RepoPath::from_path(&file);
            let relative = normalized.relative_to(&self.physical_cwd);
            diagnostic.file = Some(if relative.is_absolute() {
                PathBuf::from(normalized.as_str())
            } else {
                relative.join_to(&self.cwd)
            });
        }
        diagnostic
    }

    fn run_compiler(&self, builder: &TscBuilder) -> RatchetResult<Vec<Diagnostic>> {
        let started = Instant::now();
        let args: Vec<OsString> = vec![
            "-p".into(),
            builder.project.clone().into_os_string(),
            "--pretty".into(),
            "false".into(),
        ];
        let output = run_tool(self.tsc.as_os_str(), &args, &self.cwd, &[]).map_err(|e| {
            RatchetError::ProgramConstruction {
                message: format!("could not start {}: {}", self.tsc.display(), e),
            }
        })?;

        let diagnostics: Vec<Diagnostic> = parse_tsc_output(&output.stdout, &self.physical_cwd)
            .into_iter()
            .map(|d| self.to_logical(d))
            .collect();
        debug!(
            code = ?output.code,
            diagnostics = diagnostics.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tsc finished"
        );

        match output.code {
            Some(0) => Ok(diagnostics),
            // 1: diagnostics, outputs skipped; 2: diagnostics, outputs generated
            Some(1) | Some(2) if !diagnostics.is_empty() => Ok(diagnostics),
            _ => Err(RatchetError::ProgramConstruction {
                message: format!(
                    "{} exited with {:?}: {}",
                    self.tsc.display(),
                    output.code,
                    output.failure_text()
                ),
            }),
        }
    }
}

impl TypeChecker for TscChecker {
    type Builder = TscBuilder;

    fn build(
        &mut self,
        roots: &[PathBuf],
        options: &CompilerOptions,
        previous: Option<TscBuilder>,
    ) -> RatchetResult<TscBuilder> {
        let (build_info, generation) = match previous {
            Some(prev) => (prev.build_info, prev.generation + 1),
            None => {
                let fresh = self.workdir.path().join(BUILD_INFO_FILE);
                if fresh.exists() {
                    std::fs::remove_file(&fresh)?;
                }
                (fresh, 1)
            }
        };

        let project = self.project_path();
        let rendered = self.render_project(roots, options, &build_info);
        let text = serde_json::to_string_pretty(&rendered).map_err(|e| {
            RatchetError::ProgramConstruction {
                message: format!("could not render project file: {}", e),
            }
        })?;
        std::fs::write(&project, text)?;

        debug!(roots = roots.len(), generation, "program rebuilt");
        Ok(TscBuilder {
            project,
            build_info,
            roots: roots.to_vec(),
            generation,
            diagnostics: None,
        })
    }

    /// Runs the compiler; with `noEmit` forced there are never emit-phase diagnostics
    fn emit(&mut self, builder: &mut TscBuilder) -> RatchetResult<Vec<Diagnostic>> {
        if builder.diagnostics.is_none() {
            builder.diagnostics = Some(self.run_compiler(builder)?);
        }
        Ok(Vec::new())
    }

    fn pre_emit_diagnostics(&mut self, builder: &mut TscBuilder) -> RatchetResult<Vec<Diagnostic>> {
        match &builder.diagnostics {
            Some(diagnostics) => Ok(diagnostics.clone()),
            None => {
                let diagnostics = self.run_compiler(builder)?;
                builder.diagnostics = Some(diagnostics.clone());
                Ok(diagnostics)
            }
        }
    }

    fn format_diagnostics(&self, diagnostics: &[Diagnostic], cwd: &Path) -> String {
        format_diagnostics(diagnostics, cwd)
    }

    fn program(&self, builder: &TscBuilder) -> Option<ProgramHandle> {
        Some(ProgramHandle {
            project: builder.project.clone(),
            roots: builder.roots.clone(),
        })
    }
}

/// Parse `--pretty false` output
///
/// ```text
/// src/a.ts(3,5): error TS2322: Type 'string' is not assignable to type 'boolean'.
///   The expected type comes from ...
/// error TS5023: Unknown compiler option 'foo'.
/// ```
pub fn parse_tsc_output(output: &str, cwd: &Path) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for raw in output.lines() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            match diagnostics.last_mut() {
                Some(last) => {
                    last.message.push('\n');
                    last.message.push_str(line.trim());
                }
                None => warn!(line, "orphan continuation line in tsc output"),
            }
            continue;
        }

        if let Some(diagnostic) = parse_located(line, cwd).or_else(|| parse_global(line)) {
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

fn parse_located(line: &str, cwd: &Path) -> Option<Diagnostic> {
    // search from the right so file names containing "(" still parse
    let mut search_end = line.len();
    while let Some(close) = line[..search_end].rfind("): ") {
        let open = line[..close].rfind('(')?;
        let position = &line[open + 1..close];
        if let Some((l, c)) = position.split_once(',') {
            if let (Ok(row), Ok(col)) = (l.parse::<u32>(), c.parse::<u32>()) {
                let (category, code, message) = parse_head(&line[close + 3..])?;
                let file = &line[..open];
                let path = Path::new(file);
                let file = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                return Some(Diagnostic {
                    file: Some(file),
                    line: row,
                    column: col,
                    category,
                    code,
                    message: message.to_string(),
                });
            }
        }
        search_end = close;
    }
    None
}

fn parse_global(line: &str) -> Option<Diagnostic> {
    let (category, code, message) = parse_head(line)?;
    Some(Diagnostic {
        file: None,
        line: 0,
        column: 0,
        category,
        code,
        message: message.to_string(),
    })
}

/// `error TS2322: message` -> (Error, 2322, "message")
fn parse_head(text: &str) -> Option<(DiagnosticCategory, u32, &str)> {
    let (word, rest) = text.split_once(' ')?;
    let category = match word {
        "error" => DiagnosticCategory::Error,
        "warning" => DiagnosticCategory::Warning,
        "suggestion" => DiagnosticCategory::Suggestion,
        "message" => DiagnosticCategory::Message,
        _ => return None,
    };
    let rest = rest.strip_prefix("TS")?;
    let (code, message) = rest.split_once(": ")?;
    Some((category, code.parse().ok()?, message))
}
