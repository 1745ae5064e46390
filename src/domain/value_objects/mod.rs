//! Domain Value Objects
//!
//! Immutable value types shared by the resolver, the check engine and the
//! watch loop.

mod change_source;
mod compiler_options;
mod config_warning;
mod content_hash;
mod cutover_date;
mod ignore_patterns;
mod repo_path;
mod source_kind;

pub use change_source::ChangeSource;
pub use compiler_options::{CompilerOptions, PermittedCompilerOptions, FORCED_FLAGS};
pub use config_warning::ConfigWarning;
pub use content_hash::ContentHash;
pub use cutover_date::CutoverDate;
pub use ignore_patterns::IgnorePatterns;
pub use repo_path::{normalize_root, RepoPath};
pub use source_kind::{SourceKind, LEGACY_EXTENSIONS, SUPPORTED_EXTENSIONS, VENDOR_DIRS};
