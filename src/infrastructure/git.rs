//! Git CLI adapter for the `VersionControl` port

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::process::{describe, run_tool};
use crate::domain::ports::{StatusEntry, VersionControl};
use crate::domain::services::porcelain::{parse_status, unquote};
use crate::domain::value_objects::{normalize_root, CutoverDate, RepoPath};
use crate::error::{RatchetError, RatchetResult};

/// Similarity above which a delete+add pair is reported as a rename
pub const RENAME_THRESHOLD: &str = "-M70%";

/// Runs `git` in a fixed repository
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
    binary: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl AsRef<Path>) -> Self {
        Self {
            repo_root: normalize_root(repo_root.as_ref()),
            binary: PathBuf::from("git"),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run git and return stdout; non-zero exit is a resolution error
    fn run(&self, args: &[&str]) -> RatchetResult<String> {
        let command = describe("git", args);
        let mut full_args = vec!["-c", "core.quotepath=false"];
        full_args.extend_from_slice(args);

        let output = run_tool(
            self.binary.as_os_str(),
            &full_args,
            &self.repo_root,
            &[("GIT_OPTIONAL_LOCKS", "0")],
        )
        .map_err(|e| RatchetError::resolution(&command, e.to_string()))?;

        if !output.success() {
            return Err(RatchetError::resolution(command, output.failure_text()));
        }
        Ok(output.stdout)
    }

    fn name_list(&self, args: &[&str]) -> RatchetResult<Vec<RepoPath>> {
        let stdout = self.run(args)?;
        let files = name_lines(&stdout);
        debug!(command = %describe("git", args), count = files.len(), "git file list");
        Ok(files)
    }
}

/// Non-empty lines of a `--name-only` listing, unquoted
fn name_lines(output: &str) -> Vec<RepoPath> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| RepoPath::new(unquote(line)))
        .collect()
}

impl VersionControl for GitCli {
    fn current_branch(&self) -> RatchetResult<String> {
        match self.run(&["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(stdout) => Ok(stdout.trim().to_string()),
            // No commits yet: HEAD only names the branch
            Err(e) => match self.run(&["symbolic-ref", "--short", "HEAD"]) {
                Ok(stdout) => Ok(stdout.trim().to_string()),
                Err(_) => Err(e),
            },
        }
    }

    fn staged_new_files(&self) -> RatchetResult<Vec<RepoPath>> {
        self.name_list(&[
            "diff",
            "--name-only",
            RENAME_THRESHOLD,
            "--diff-filter=AC",
            "--cached",
        ])
    }

    fn files_committed_since(
        &self,
        branch: &str,
        date: &CutoverDate,
    ) -> RatchetResult<Vec<RepoPath>> {
        let since = format!("--since={}", date.to_git_arg());
        self.name_list(&[
            "log",
            branch,
            &since,
            "--name-only",
            "--diff-filter=AC",
            RENAME_THRESHOLD,
            "--pretty=format:",
        ])
    }

    fn files_in_commits_not_on_other_branches(
        &self,
        branch: &str,
    ) -> RatchetResult<Vec<RepoPath>> {
        let exclude = format!("--exclude={}", branch);
        self.name_list(&[
            "log",
            branch,
            "--name-only",
            "--not",
            &exclude,
            "--branches",
            "--remotes",
            "--pretty=format:",
        ])
    }

    fn status(&self) -> RatchetResult<Vec<StatusEntry>> {
        let stdout = self.run(&[
            "status",
            RENAME_THRESHOLD,
            "--porcelain",
            "--untracked-files=all",
        ])?;
        Ok(parse_status(&stdout))
    }

    fn stage(&self, paths: &[RepoPath]) -> RatchetResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args: Vec<&str> = vec!["add", "--"];
        args.extend(paths.iter().map(|p| p.as_str()));
        self.run(&args).map(|_| ())
    }
}

/// Whether `git` can be spawned at all
pub fn git_available() -> bool {
    super::process::is_available(OsStr::new("git"))
}
