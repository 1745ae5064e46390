//! Repository Path Value Object
//!
//! Version control reports paths relative to the repository root with `/`
//! separators; the type-checker and notifier hand back absolute paths. Every
//! comparison in the pipeline goes through `RepoPath` so that `./a.ts`,
//! `a.ts` and `a\\b.ts` style spellings compare equal.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A normalized file path, identity is normalized string equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RepoPath(String);

impl RepoPath {
    /// Normalize a raw path string
    ///
    /// - `\` becomes `/`
    /// - repeated `/` collapse to one
    /// - `.` segments are dropped (`./a.ts`, `src/./a.ts`)
    /// - `..` removes the previous segment; above an absolute root it is dropped
    /// - a trailing `/` is dropped (except for the filesystem root)
    pub fn new(raw: impl AsRef<str>) -> Self {
        let unified = raw.as_ref().trim().replace('\\', "/");
        let absolute = unified.starts_with('/');
        let mut segments: Vec<&str> = Vec::new();
        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => match segments.last() {
                    Some(&last) if last != ".." => {
                        segments.pop();
                    }
                    None if absolute => {}
                    _ => segments.push(".."),
                },
                _ => segments.push(segment),
            }
        }
        let joined = segments.join("/");
        if absolute {
            Self(format!("/{}", joined))
        } else {
            Self(joined)
        }
    }

    /// Normalize a filesystem path
    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/') || Path::new(&self.0).is_absolute()
    }

    /// File extension without the dot, as written
    pub fn extension(&self) -> Option<&str> {
        let file_name = self.file_name();
        let dot = file_name.rfind('.')?;
        if dot == 0 {
            return None;
        }
        Some(&file_name[dot + 1..])
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Iterate over the `/`-separated segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Join onto a repository root; absolute paths are returned unchanged
    pub fn join_to(&self, root: &Path) -> PathBuf {
        if self.is_absolute() {
            PathBuf::from(&self.0)
        } else {
            normalize_root(root).join(&self.0)
        }
    }

    /// Strip a root prefix, producing a repo-relative path when possible
    pub fn relative_to(&self, root: &Path) -> RepoPath {
        let root = RepoPath::from_path(root);
        if root.is_empty() {
            return self.clone();
        }
        match self.0.strip_prefix(root.as_str()) {
            Some(rest) if rest.starts_with('/') => RepoPath::new(&rest[1..]),
            _ => self.clone(),
        }
    }
}

/// Strip trailing separators from a repository root
pub fn normalize_root(root: &Path) -> PathBuf {
    let raw = root.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        root.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RepoPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RepoPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RepoPath> for String {
    fn from(p: RepoPath) -> Self {
        p.0
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
