//! Path helpers for configuration discovery.

use std::env;
use std::path::PathBuf;

use dirs_next::home_dir;

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// Path taken from environment variable `name`, when set and non-blank.
pub fn path_from_env(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| expand_tilde(&value))
}
