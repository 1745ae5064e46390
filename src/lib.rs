//! tsratchet - incremental strict type-check and lint enforcement
//!
//! Codebases migrating to strict TypeScript cannot turn strictness on for
//! every file at once. tsratchet derives the set of files a change touches
//! from git, type-checks and lints only those with strictness forced on,
//! and keeps doing so on every save in watch mode.
//!
//! Layers:
//!
//! - `domain` - value objects, pure services, and the ports the tools sit behind
//! - `application` - scope resolution, the incremental engine, the orchestrator, watch
//! - `infrastructure` - git, tsc and eslint over subprocesses
//! - `config` - `tsratchet.toml` loading and environment overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{Orchestrator, OrchestratorOptions, RunResult, WatchEvent};
pub use config::Config;
pub use error::{RatchetError, RatchetResult};
