use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ColorParseError, TokenId};

/// RGBA color parsed from `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError { value: value.to_string() };
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: alpha,
        })
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Visual attributes the text surface applies to a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStyle {
    pub foreground: Rgba,
    pub background: Option<Rgba>,
    pub bold: bool,
}

/// Which highlight rule claimed a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightKind {
    /// Token is neither under the cursor nor a confirmed entity
    Default,
    /// Token is a confirmed entity (wins over the cursor)
    TaggedEntity,
    /// Token is being edited
    UnderCursor,
}

/// Style decision for a single token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedSpan {
    pub token_id: TokenId,
    pub start: usize,
    pub length: usize,
    pub kind: HighlightKind,
    pub style: TokenStyle,
}

/// Contiguous slice of the full text, ready to render.
///
/// Runs partition the text: whitespace gaps and unclaimed tokens carry no style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledRun {
    pub start: usize,
    pub length: usize,
    pub kind: Option<HighlightKind>,
    pub style: Option<TokenStyle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        let opaque: Rgba = "#1e90ff".parse().expect("rgb");
        assert_eq!(opaque, Rgba::rgb(0x1e, 0x90, 0xff));

        let translucent: Rgba = "#D3D3D34D".parse().expect("rgba");
        assert_eq!(translucent, Rgba::rgb(0xd3, 0xd3, 0xd3).with_alpha(0x4d));
        assert_eq!(translucent.to_string(), "#d3d3d34d");
    }

    #[test]
    fn rejects_malformed_hex() {
        for value in ["1e90ff", "#1e90f", "#zzzzzz", "#1e90ff0", "#ééé"] {
            assert!(value.parse::<Rgba>().is_err(), "expected '{value}' to be rejected");
        }
    }

    #[test]
    fn round_trips_through_string_form() {
        let json = serde_json::to_string(&Rgba::rgb(0xa5, 0x2a, 0x2a)).expect("serialize");
        assert_eq!(json, "\"#a52a2a\"");
        let parsed: Rgba = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, Rgba::rgb(0xa5, 0x2a, 0x2a));
    }
}
