//! Configuration validation for the editing session.

use mentions_types::Rgba;
use thiserror::Error;
use tracing::debug;

use crate::config::EditorConfig;

/// Longest provider timeout accepted from configuration.
pub const MAX_SEARCH_TIMEOUT_MS: u64 = 600_000;
/// Longest result cache lifetime accepted from configuration.
pub const MAX_CACHE_TTL_MS: u64 = 3_600_000;

/// Validate the entire editor configuration.
pub fn validate_config(config: &EditorConfig) -> Result<(), ValidationError> {
    validate_bound("searchTimeoutMs", config.search_timeout_ms, MAX_SEARCH_TIMEOUT_MS)?;
    validate_bound("cacheTtlMs", config.cache_ttl_ms, MAX_CACHE_TTL_MS)?;

    let palette = &config.palette;
    validate_foreground("palette.accent", palette.accent)?;
    validate_foreground("palette.confirmedForeground", palette.confirmed_foreground)?;
    validate_foreground("palette.attention", palette.attention)?;

    debug!(
        search_timeout_ms = config.search_timeout_ms,
        cache_ttl_ms = config.cache_ttl_ms,
        "validated editor configuration"
    );
    Ok(())
}

fn validate_bound(field: &str, value: u64, max: u64) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

fn validate_foreground(field: &str, color: Rgba) -> Result<(), ValidationError> {
    if color.a == 0 {
        return Err(ValidationError::InvisibleColor {
            field: field.to_string(),
            color: color.to_string(),
        });
    }
    Ok(())
}

/// Validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{field}' is {value}, maximum is {max}")]
    OutOfRange { field: String, value: u64, max: u64 },

    #[error("'{field}' color {color} is fully transparent")]
    InvisibleColor { field: String, color: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&EditorConfig::default()), Ok(()));
    }

    #[test]
    fn rejects_excessive_timeout() {
        let config = EditorConfig {
            search_timeout_ms: MAX_SEARCH_TIMEOUT_MS + 1,
            ..EditorConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::OutOfRange { field, .. }) if field == "searchTimeoutMs"
        ));
    }

    #[test]
    fn rejects_transparent_foreground() {
        let mut config = EditorConfig::default();
        config.palette.attention = Rgba::rgb(0xff, 0, 0).with_alpha(0);
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvisibleColor { field, .. }) if field == "palette.attention"
        ));
    }

    #[test]
    fn transparent_background_is_allowed() {
        let mut config = EditorConfig::default();
        config.palette.confirmed_background = Rgba::rgb(0, 0, 0).with_alpha(0);
        assert_eq!(validate_config(&config), Ok(()));
    }
}
