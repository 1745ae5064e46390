//! Error types for tsratchet
//!
//! Library code returns `RatchetResult`; the binary wraps it in `anyhow`.
//! Expected outcomes (type errors, lint errors, forbidden extensions) are not
//! errors and live in `RunResult` instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tsratchet operations
pub type RatchetResult<T> = Result<T, RatchetError>;

/// Main error type for tsratchet operations
#[derive(Error, Debug)]
pub enum RatchetError {
    /// A version-control query failed; the run's scope cannot be determined
    #[error("version control query `{command}` failed: {message}")]
    Resolution { command: String, message: String },

    /// `check()` was called before `create_program()`
    #[error("check called before create_program")]
    EngineMisuse,

    /// The type-checker could not be started or crashed
    #[error("type checker failed: {message}")]
    ProgramConstruction { message: String },

    /// The lint engine could not be started, crashed, or produced unreadable output
    #[error("lint engine failed: {message}")]
    LintEngine { message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Cutover date could not be parsed
    #[error("invalid leak date '{value}': expected unix seconds, RFC 3339, or YYYY-MM-DD")]
    InvalidLeakDate { value: String },

    /// A watch ignore glob could not be compiled
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The filesystem notifier failed
    #[error("file watcher error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RatchetError {
    pub fn resolution(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborted scope resolution (as opposed to checking)
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }
}

impl From<notify::Error> for RatchetError {
    fn from(err: notify::Error) -> Self {
        Self::Watch(err.to_string())
    }
}
