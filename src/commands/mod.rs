//! Command handlers for the `tsratchet` binary
//!
//! Each handler opens a [`session::Session`], wires the orchestrator to the
//! real tools and renders through `ui`.

pub mod check;
mod project_root;
pub mod scope;
pub mod session;
pub mod watch;

pub use check::cmd_check;
pub use scope::cmd_scope;
pub use session::GlobalArgs;
pub use watch::{cmd_watch, WatchArgs};
