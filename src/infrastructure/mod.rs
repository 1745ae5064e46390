//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process and filesystem I/O.
//!
//! ## Structure
//!
//! - `git` - `VersionControl` over the git CLI
//! - `tsc` - `TypeChecker` over the TypeScript compiler CLI
//! - `eslint` - `LintEngine` over the ESLint CLI
//! - `process` - shared subprocess helpers

pub mod eslint;
pub mod git;
pub mod process;
pub mod tsc;

// Re-export for convenience
pub use eslint::EslintEngine;
pub use git::{git_available, GitCli};
pub use process::resolve_node_bin;
pub use tsc::{TscBuilder, TscChecker};
