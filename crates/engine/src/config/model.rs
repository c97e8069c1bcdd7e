//! Configuration data model for the editing session.

use std::time::Duration;

use mentions_types::{Rgba, TokenStyle};
use mentions_util::OffsetSpace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EditorConfig {
    /// Upper bound for a single provider call; `0` disables the timeout.
    pub search_timeout_ms: u64,

    /// How long fetched candidates are reused for an identical query; `0` disables caching.
    pub cache_ttl_ms: u64,

    /// Unit the host uses for cursor offsets and edit ranges.
    pub offset_space: OffsetSpace,

    /// Only treat known entities shaped like email addresses as confirmed.
    pub require_email_shape: bool,

    pub palette: HighlightPalette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            search_timeout_ms: 5_000,
            cache_ttl_ms: 30_000,
            offset_space: OffsetSpace::default(),
            require_email_shape: false,
            palette: HighlightPalette::default(),
        }
    }
}

impl EditorConfig {
    pub fn search_timeout(&self) -> Option<Duration> {
        (self.search_timeout_ms > 0).then(|| Duration::from_millis(self.search_timeout_ms))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

/// Colors used by the three highlight rules. All three styles are bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HighlightPalette {
    /// Foreground for ordinary tokens.
    pub accent: Rgba,
    pub confirmed_foreground: Rgba,
    pub confirmed_background: Rgba,
    /// Foreground for the token being edited.
    pub attention: Rgba,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            accent: Rgba::rgb(0x00, 0x00, 0xff),
            confirmed_foreground: Rgba::rgb(0xa5, 0x2a, 0x2a),
            confirmed_background: Rgba::rgb(0xd3, 0xd3, 0xd3).with_alpha(0x4d),
            attention: Rgba::rgb(0xff, 0x00, 0x00),
        }
    }
}

impl HighlightPalette {
    pub fn default_style(&self) -> TokenStyle {
        TokenStyle {
            foreground: self.accent,
            background: None,
            bold: true,
        }
    }

    pub fn confirmed_style(&self) -> TokenStyle {
        TokenStyle {
            foreground: self.confirmed_foreground,
            background: Some(self.confirmed_background),
            bold: true,
        }
    }

    pub fn under_cursor_style(&self) -> TokenStyle {
        TokenStyle {
            foreground: self.attention,
            background: None,
            bold: true,
        }
    }
}

/// Errors that can occur while reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::config::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: EditorConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.search_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn camel_case_fields_and_hex_palette() {
        let json = r##"{
            "searchTimeoutMs": 0,
            "offsetSpace": "utf16",
            "requireEmailShape": true,
            "palette": { "attention": "#00ff00" }
        }"##;
        let config: EditorConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.search_timeout(), None);
        assert_eq!(config.offset_space, OffsetSpace::Utf16);
        assert!(config.require_email_shape);
        assert_eq!(config.palette.attention, Rgba::rgb(0, 0xff, 0));
        assert_eq!(config.palette.accent, HighlightPalette::default().accent);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = serde_json::from_str::<EditorConfig>(r#"{"debounceMs": 250}"#).unwrap_err();
        assert!(error.to_string().contains("debounceMs"));
    }

    #[test]
    fn default_palette_styles() {
        let palette = HighlightPalette::default();
        let confirmed = palette.confirmed_style();
        assert_eq!(confirmed.background.map(|color| color.to_string()), Some("#d3d3d34d".to_string()));
        assert!(confirmed.bold);
        assert_eq!(palette.default_style().foreground.to_string(), "#0000ff");
        assert_eq!(palette.under_cursor_style().foreground.to_string(), "#ff0000");
    }
}
