//! Orchestrator
//!
//! Composes the pipeline for one run:
//! resolve scope → guard extensions → filter to checkable sources →
//! build program → lint → type-check → restage → report.
//!
//! ## Usage
//!
//! ```ignore
//! let options = OrchestratorOptions::new("/path/to/repo")
//!     .with_staged_files(true)
//!     .on_results(|result| println!("{}", result.success));
//! let mut orchestrator = Orchestrator::new(options, vcs, checker, linter);
//! let result = orchestrator.run()?;
//! ```

mod options;
mod result;
mod use_case;


pub use options::{OrchestratorOptions, ResultCallback};
pub use result::{RunResult, ScopePreview};
pub use use_case::{Orchestrator, StopHandle};
