//! Subprocess helpers shared by the git, tsc and eslint adapters

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;
use tracing::{debug, trace};

/// Per-repository cache for generated tool configs, under `node_modules`
pub const REPO_CACHE_DIR: &str = "node_modules/.cache/tsratchet";

/// Captured result of a finished tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stderr if non-empty, otherwise stdout, trimmed
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Run `program args...` in `cwd`, capturing both streams
pub fn run_tool<I, S>(
    program: &OsStr,
    args: I,
    cwd: &Path,
    envs: &[(&str, &str)],
) -> std::io::Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    trace!(command = ?cmd, "spawning");
    let output = cmd.output()?;

    Ok(ToolOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Check if a program can be spawned (used to skip or warn early)
pub fn is_available(program: &OsStr) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Resolve a node tool: explicit path, then the repo's `node_modules/.bin`, then `PATH`
pub fn resolve_node_bin(explicit: Option<&Path>, repo_root: &Path, name: &str) -> PathBuf {
    if let Some(path) = explicit {
        return if path.is_relative() && path.components().count() > 1 {
            repo_root.join(path)
        } else {
            path.to_path_buf()
        };
    }

    let local = repo_root.join("node_modules").join(".bin").join(name);
    if local.exists() {
        local
    } else {
        PathBuf::from(name)
    }
}

/// Private working directory for one tool instance
///
/// Node tools resolve parsers, shared configs and `@types` by walking up
/// from the generated file, so the directory lives inside the repository's
/// `node_modules` when there is one. Otherwise it falls back to the system
/// temp dir. Removed on drop either way.
pub fn tool_workdir(repo_root: &Path, prefix: &str) -> std::io::Result<TempDir> {
    if repo_root.join("node_modules").is_dir() {
        let cache = repo_root.join(REPO_CACHE_DIR);
        match std::fs::create_dir_all(&cache)
            .and_then(|_| tempfile::Builder::new().prefix(prefix).tempdir_in(&cache))
        {
            Ok(dir) => return Ok(dir),
            Err(e) => debug!(error = %e, cache = %cache.display(), "repository cache unavailable"),
        }
    }
    tempfile::Builder::new().prefix(prefix).tempdir()
}

/// Render a command line for error messages
pub fn describe<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.as_ref().to_string()));
    parts.join(" ")
}
