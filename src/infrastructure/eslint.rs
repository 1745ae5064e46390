//! `eslint` adapter for the `LintEngine` port
//!
//! The engine never discovers configuration on its own: the base config is
//! written to a private file and passed with `--no-eslintrc -c`. That file
//! sits in the repository's `node_modules` cache so `parser` and `extends`
//! resolve from the repository. When a program
//! handle is supplied, `parserOptions.project` points at the checker's
//! generated project so type-aware rules see the same program.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;
use tracing::debug;

use super::process::{run_tool, tool_workdir};
use crate::domain::ports::{
    LintConfig, LintEngine, LintFileResult, LintMessage, LintReport, LintSeverity, ProgramHandle,
};
use crate::domain::services::format_stylish;
use crate::domain::value_objects::{normalize_root, RepoPath};
use crate::error::{RatchetError, RatchetResult};

const CONFIG_FILE: &str = "eslintrc.tsratchet.json";

pub struct EslintEngine {
    eslint: PathBuf,
    cwd: PathBuf,
    workdir: TempDir,
}

impl EslintEngine {
    pub fn new(eslint: impl Into<PathBuf>, cwd: impl AsRef<Path>) -> RatchetResult<Self> {
        let cwd = normalize_root(cwd.as_ref());
        let workdir = tool_workdir(&cwd, "eslint-")?;
        Ok(Self {
            eslint: eslint.into(),
            cwd,
            workdir,
        })
    }

    fn write_config(&self, config: &LintConfig, program: Option<&ProgramHandle>) -> RatchetResult<PathBuf> {
        let composed = compose_config(config, program);
        let path = self.workdir.path().join(CONFIG_FILE);
        let text = serde_json::to_string_pretty(&composed).map_err(|e| RatchetError::LintEngine {
            message: format!("could not render lint config: {}", e),
        })?;
        std::fs::write(&path, text)?;
        Ok(path)
    }
}

/// Base config with `parserOptions.project` set to the shared program
pub fn compose_config(config: &LintConfig, program: Option<&ProgramHandle>) -> Value {
    let mut composed = match &config.0 {
        Value::Object(_) => config.0.clone(),
        _ => json!({}),
    };
    if let (Some(program), Some(map)) = (program, composed.as_object_mut()) {
        let parser_options = map
            .entry("parserOptions")
            .or_insert_with(|| json!({}));
        if !parser_options.is_object() {
            *parser_options = json!({});
        }
        if let Some(parser_options) = parser_options.as_object_mut() {
            parser_options.insert(
                "project".into(),
                json!([program.project.to_string_lossy()]),
            );
        }
    }
    composed
}

impl LintEngine for EslintEngine {
    fn lint(
        &mut self,
        files: &[PathBuf],
        config: &LintConfig,
        program: Option<&ProgramHandle>,
    ) -> RatchetResult<LintReport> {
        if files.is_empty() {
            return Ok(LintReport::default());
        }

        let config_path = self.write_config(config, program)?;
        let mut args: Vec<OsString> = vec![
            "--no-eslintrc".into(),
            "-c".into(),
            config_path.into_os_string(),
            "--resolve-plugins-relative-to".into(),
            self.cwd.clone().into_os_string(),
            "--format".into(),
            "json".into(),
        ];
        args.extend(files.iter().map(|f| f.clone().into_os_string()));

        let started = Instant::now();
        let output = run_tool(
            self.eslint.as_os_str(),
            &args,
            &self.cwd,
            &[("ESLINT_USE_FLAT_CONFIG", "false")],
        )
        .map_err(|e| RatchetError::LintEngine {
            message: format!("could not start {}: {}", self.eslint.display(), e),
        })?;

        debug!(
            code = ?output.code,
            files = files.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "eslint finished"
        );

        // 0: clean, 1: lint errors; anything else is a crash or config error
        if !matches!(output.code, Some(0) | Some(1)) {
            return Err(RatchetError::LintEngine {
                message: format!(
                    "{} exited with {:?}: {}",
                    self.eslint.display(),
                    output.code,
                    output.failure_text()
                ),
            });
        }

        let results = parse_eslint_json(&output.stdout, files)?;
        let formatted = format_stylish(&results);
        Ok(LintReport { results, formatted })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    file_path: PathBuf,
    #[serde(default)]
    messages: Vec<RawMessage>,
    #[serde(default)]
    error_count: usize,
    #[serde(default)]
    warning_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(default)]
    rule_id: Option<String>,
    #[serde(default)]
    severity: u8,
    #[serde(default)]
    message: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    column: u32,
}

/// Parse `--format json` output, ordered like `files`
pub fn parse_eslint_json(stdout: &str, files: &[PathBuf]) -> RatchetResult<Vec<LintFileResult>> {
    let raw: Vec<RawResult> =
        serde_json::from_str(stdout.trim()).map_err(|e| RatchetError::LintEngine {
            message: format!("unreadable lint output: {}", e),
        })?;

    let order: HashMap<RepoPath, usize> = files
        .iter()
        .enumerate()
        .map(|(i, f)| (RepoPath::from_path(f), i))
        .collect();

    let mut results: Vec<LintFileResult> = raw
        .into_iter()
        .map(|r| LintFileResult {
            file: r.file_path,
            error_count: r.error_count,
            warning_count: r.warning_count,
            messages: r
                .messages
                .into_iter()
                .filter(|m| m.severity > 0)
                .map(|m| LintMessage {
                    line: m.line,
                    column: m.column,
                    severity: if m.severity >= 2 {
                        LintSeverity::Error
                    } else {
                        LintSeverity::Warning
                    },
                    message: m.message,
                    rule_id: m.rule_id,
                })
                .collect(),
        })
        .collect();

    results.sort_by_key(|r| {
        order
            .get(&RepoPath::from_path(&r.file))
            .copied()
            .unwrap_or(usize::MAX)
    });
    Ok(results)
}
