//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::{ConfigWarning, CutoverDate, PermittedCompilerOptions};
use crate::error::{RatchetError, RatchetResult};

use super::types::Config;

/// Project config file name, looked up at the repository root
pub const CONFIG_FILE_NAME: &str = "tsratchet.toml";

/// A loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when built-in defaults were used
    pub path: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RatchetResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| RatchetError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the explicit config, else the project config, else the user
/// config, else defaults; then apply environment overrides
///
/// A config file that exists but does not parse is an error.
pub fn load(project_root: &Path, explicit: Option<&Path>) -> RatchetResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [
            Some(project_root.join(CONFIG_FILE_NAME)),
            user_config_path(),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.exists()),
    };

    let loaded = match candidate {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            debug!(path = %path.display(), warnings = warnings.len(), "loaded config");
            LoadedConfig {
                config,
                warnings,
                path: Some(path),
            }
        }
        None => LoadedConfig::default(),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config),
        ..loaded
    })
}

/// User-level config: `<config dir>/tsratchet/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tsratchet").join("config.toml"))
}

/// Apply environment variable overrides (TSRATCHET_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // TSRATCHET_LEAK_DATE
    if let Ok(value) = std::env::var("TSRATCHET_LEAK_DATE") {
        match value.parse::<CutoverDate>() {
            Ok(date) => config.scope.leak_date = Some(date),
            Err(e) => warn!(error = %e, "ignoring TSRATCHET_LEAK_DATE"),
        }
    }

    // TSRATCHET_REPO
    if let Ok(repo) = std::env::var("TSRATCHET_REPO") {
        if !repo.trim().is_empty() {
            config.repo = Some(PathBuf::from(repo));
        }
    }

    // TSRATCHET_DEBOUNCE_MS
    if let Ok(value) = std::env::var("TSRATCHET_DEBOUNCE_MS") {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => warn!(value = %value, "ignoring TSRATCHET_DEBOUNCE_MS"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "repo",
        "scope",
        "staged",
        "unstaged",
        "committed_since_leak_date",
        "committed_not_on_other_branches",
        "leak_date",
        "extra_files",
        "exclude_files",
        "type_checker",
        "tsc",
        "compiler_options",
        "lint",
        "eslint",
        "type_aware",
        "base_config",
        "watch",
        "debounce_ms",
        "watch_files",
        "ignore",
        "watch_included_files",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES.iter().chain(PermittedCompilerOptions::KEYS) {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
