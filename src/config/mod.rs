//! Configuration module for tsratchet
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TSRATCHET_*)
//! 3. Explicit `--config` file, else project config (`tsratchet.toml`)
//! 4. User config (`<config dir>/tsratchet/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    load, load_with_warnings, user_config_path, with_env_overrides, LoadedConfig,
    CONFIG_FILE_NAME,
};
pub use types::{
    ColorMode, Config, LintSection, OutputConfig, ScopeConfig, TypeCheckerConfig, WatchConfig,
};
