//! Configuration IO helpers for the editor configuration.

use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use mentions_util::path_from_env;
use tracing::debug;

use crate::config::{ConfigError, EditorConfig, validate_config};

/// Environment variable that overrides the configuration location.
pub const CONFIG_PATH_ENV: &str = "MENTIONS_CONFIG_PATH";

/// Returns the default path for the editor configuration file.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = path_from_env(CONFIG_PATH_ENV) {
        return path;
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("mentions").join("editor.json")
}

/// Loads and validates the editor configuration from the default path.
pub fn load_config() -> anyhow::Result<EditorConfig> {
    let path = default_config_path();
    load_config_from_path(&path)
}

/// Loads and validates the editor configuration from a specific path.
///
/// A missing file yields [`EditorConfig::default`]. Files ending in `.yaml`
/// or `.yml` are parsed as YAML, everything else as JSON.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<EditorConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no editor configuration found, using defaults");
        return Ok(EditorConfig::default());
    }

    let content = fs::read_to_string(path).map_err(ConfigError::from)?;
    let config: EditorConfig = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(ConfigError::from)?
    } else {
        serde_json::from_str(&content).map_err(ConfigError::from)?
    };
    validate_config(&config).map_err(ConfigError::from)?;
    debug!(path = %path.display(), "loaded editor configuration");
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"))
}
