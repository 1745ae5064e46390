//! Debounce state for the watch loop

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Default quiet period in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Coalesces bursts of changes into one trigger after a quiet period
#[derive(Debug)]
pub struct Debouncer {
    pending: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
    quiet: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            pending: BTreeSet::new(),
            last_change: None,
            quiet,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record a change; restarts the quiet period
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// True once changes are pending and the quiet period has elapsed
    pub fn should_fire(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending.is_empty() && last.elapsed() >= self.quiet,
            None => false,
        }
    }

    /// Take all pending changes, sorted, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
