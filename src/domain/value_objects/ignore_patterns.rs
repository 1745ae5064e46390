//! Ignore patterns value object
//!
//! Decides which filesystem events the watch loop drops: dotfiles and
//! dot-directories below the root, plus caller-supplied gitignore-style
//! globs (`ignore_files_from_watch`).

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Component, Path, PathBuf};

use crate::error::{RatchetError, RatchetResult};

/// Compiled watch ignore rules for one root
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug)]
pub struct IgnorePatterns {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Only the dotfile rule, no globs
    pub fn empty() -> Self {
        Self {
            root: PathBuf::new(),
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Compile `patterns` relative to `root`; blank lines and `#` comments are skipped
    pub fn from_patterns<S: AsRef<str>>(root: &Path, patterns: &[S]) -> RatchetResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for pattern in patterns {
            let line = pattern.as_ref();
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|e| RatchetError::InvalidPattern {
                    pattern: line.to_string(),
                    message: e.to_string(),
                })?;
            pattern_count += 1;
        }

        let matcher = builder.build().map_err(|e| RatchetError::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            pattern_count,
        })
    }

    /// Check if an event path should be dropped
    ///
    /// Paths under the root are matched relative to it; for anything else
    /// only the file name is considered.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = if self.root.as_os_str().is_empty() {
            None
        } else {
            path.strip_prefix(&self.root).ok()
        };

        match relative {
            Some(rel) => {
                if has_dot_segment(rel) {
                    return true;
                }
                if self.pattern_count == 0 || rel.as_os_str().is_empty() {
                    return false;
                }
                self.matcher
                    .matched_path_or_any_parents(rel, is_dir)
                    .is_ignore()
            }
            None => {
                let name = match path.file_name() {
                    Some(name) => Path::new(name),
                    None => return false,
                };
                if has_dot_segment(name) {
                    return true;
                }
                self.pattern_count > 0 && self.matcher.matched(name, is_dir).is_ignore()
            }
        }
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

fn has_dot_segment(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
