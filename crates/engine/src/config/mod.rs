//! Editor configuration.
//! This module handles loading and validation of the
//! ~/.config/mentions/editor.json (or .yaml) configuration file.

mod io;
mod model;
mod validation;

pub use io::{CONFIG_PATH_ENV, default_config_path, load_config, load_config_from_path};
pub use model::{ConfigError, EditorConfig, HighlightPalette};
pub use validation::{MAX_CACHE_TTL_MS, MAX_SEARCH_TIMEOUT_MS, ValidationError, validate_config};
