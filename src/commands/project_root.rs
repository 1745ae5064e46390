use std::path::{Path, PathBuf};

use tsratchet::config::CONFIG_FILE_NAME;

/// Discover the repository root from an invocation directory.
///
/// Walking upward from `start`, the first directory that holds either
/// `tsratchet.toml` or `.git` (a directory, or a file in a worktree) wins.
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_repo_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file() || dir.join(".git").exists())
        .unwrap_or(start)
        .to_path_buf()
}
