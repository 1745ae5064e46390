//! Common test utilities for tsratchet integration tests.
//!
//! This module provides:
//! - `TestRepo`: a real git repository with pinned commit dates
//! - Fakes: version control, type checker and lint engine driven by file contents
//! - `tsratchet()`: the built binary with color disabled

#![allow(dead_code)]

pub mod fakes;
pub mod repo;

pub use fakes::*;
pub use repo::*;

use std::process::Command;

/// The `tsratchet` binary, with output made deterministic
pub fn tsratchet() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tsratchet"));
    cmd.env("NO_COLOR", "1");
    cmd.env("TERM", "dumb");
    cmd.env(
        "XDG_CONFIG_HOME",
        std::env::temp_dir().join("tsratchet-tests-no-user-config"),
    );
    cmd.env_remove("TSRATCHET_LEAK_DATE");
    cmd.env_remove("TSRATCHET_REPO");
    cmd.env_remove("TSRATCHET_DEBOUNCE_MS");
    cmd
}
