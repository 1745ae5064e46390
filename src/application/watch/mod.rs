//! Watch
//!
//! Filesystem watching for the re-run loop:
//! - `WatchCoordinator` - notifier wrapper with a live, mutable subscription
//! - `Debouncer` - coalesces bursts of changes (100ms default)
//! - `WatchEvent` - events emitted while watching, NDJSON-ready
//!
//! The loop itself lives on `Orchestrator::watch`, which owns the
//! coordinator so a run and the subscription are never touched concurrently.

mod coordinator;
mod debounce;
mod event;


pub use coordinator::{event_key, translate, FsEvent, FsEventKind, WatchCoordinator};
pub use debounce::{Debouncer, DEBOUNCE_MS};
pub use event::WatchEvent;
