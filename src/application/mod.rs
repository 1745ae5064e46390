//! Application Layer
//!
//! Use cases that orchestrate the migration checks.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT talk to git, tsc, or eslint directly (those are ports)
//! - Owns the long-lived state: the incremental program and the watch
//!
//! ## Components
//!
//! - `ChangeSetResolver` - Derives the scope from version-control state
//! - `IncrementalCheckEngine` - Keeps the checker's builder across runs
//! - `LintAdapter` - Lints the scope and reduces it to a verdict
//! - `Orchestrator` - Runs the whole pipeline, once or on every change
//! - `watch` - Notifier wrapper, debouncer, watch events

pub mod engine;
pub mod lint;
pub mod orchestrator;
pub mod resolver;
pub mod watch;

pub use engine::{CheckOutcome, IncrementalCheckEngine};
pub use lint::{LintAdapter, LintOutcome};
pub use orchestrator::{
    Orchestrator, OrchestratorOptions, ResultCallback, RunResult, ScopePreview, StopHandle,
};
pub use resolver::{ChangeSetResolver, ResolvedScope};
pub use watch::{
    Debouncer, FsEvent, FsEventKind, WatchCoordinator, WatchEvent, DEBOUNCE_MS,
};
