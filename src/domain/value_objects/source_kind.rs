//! Source file classification by extension

use super::RepoPath;

/// Extensions that are type-checked and linted
pub const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx", "cts", "mts"];

/// Untyped extensions that must not appear in migrated scope
pub const LEGACY_EXTENSIONS: &[&str] = &["js", "jsx"];

/// Third-party directories that are never part of the migration
pub const VENDOR_DIRS: &[&str] = &["node_modules"];

/// What kind of source a path holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.ts`, `.tsx`, `.cts`, `.mts` (including declaration files)
    TypeScript,
    /// `.js`, `.jsx`
    LegacyJavaScript,
    /// Anything else (json, css, markdown, ...)
    Other,
}

impl SourceKind {
    pub fn of(path: &RepoPath) -> Self {
        match path.extension() {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => SourceKind::TypeScript,
            Some(ext) if LEGACY_EXTENSIONS.contains(&ext) => SourceKind::LegacyJavaScript,
            _ => SourceKind::Other,
        }
    }

    /// Whether the path lives under a vendored directory at any depth
    pub fn is_vendored(path: &RepoPath) -> bool {
        path.segments().any(|segment| VENDOR_DIRS.contains(&segment))
    }

    /// In-scope source that should be handed to the checker and linter
    pub fn is_checkable(path: &RepoPath) -> bool {
        Self::of(path) == SourceKind::TypeScript && !Self::is_vendored(path)
    }
}
