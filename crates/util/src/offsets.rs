//! Offset conversion at the text-surface boundary.
//!
//! The engine measures everything in UTF-8 byte offsets. Hosts that report
//! cursors in UTF-16 code units (most native text views) or in chars convert
//! through [`OffsetSpace`]. Offsets are clamped to the text length and floored
//! to the previous boundary when they land inside a character.

use serde::{Deserialize, Serialize};

/// Unit in which a host reports and expects cursor offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetSpace {
    /// UTF-8 bytes (the engine's native space)
    #[default]
    Utf8,
    /// UTF-16 code units
    Utf16,
    /// Unicode scalar values
    Chars,
}

impl OffsetSpace {
    /// Convert a host offset into a UTF-8 byte offset on a char boundary.
    pub fn to_byte_offset(self, text: &str, offset: usize) -> usize {
        match self {
            Self::Utf8 => floor_char_boundary(text, offset),
            Self::Utf16 => utf16_to_byte_offset(text, offset),
            Self::Chars => char_to_byte_offset(text, offset),
        }
    }

    /// Convert a UTF-8 byte offset into this space.
    pub fn from_byte_offset(self, text: &str, byte_offset: usize) -> usize {
        match self {
            Self::Utf8 => floor_char_boundary(text, byte_offset),
            Self::Utf16 => byte_to_utf16_offset(text, byte_offset),
            Self::Chars => byte_to_char_offset(text, byte_offset),
        }
    }
}

/// Clamp `offset` to `text.len()` and move it back onto a char boundary.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Byte offset of the character containing UTF-16 offset `utf16_offset`.
///
/// An offset that splits a surrogate pair maps to the start of that character.
pub fn utf16_to_byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0usize;
    for (byte_index, character) in text.char_indices() {
        let next = units + character.len_utf16();
        if next > utf16_offset {
            return byte_index;
        }
        units = next;
    }
    text.len()
}

pub fn byte_to_utf16_offset(text: &str, byte_offset: usize) -> usize {
    let byte_offset = floor_char_boundary(text, byte_offset);
    text[..byte_offset].chars().map(char::len_utf16).sum()
}

pub fn char_to_byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte_index, _)| byte_index)
        .unwrap_or(text.len())
}

pub fn byte_to_char_offset(text: &str, byte_offset: usize) -> usize {
    let byte_offset = floor_char_boundary(text, byte_offset);
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a😀é@b"; // a(1) 😀(4 bytes, 2 units) é(2 bytes, 1 unit) @ b

    #[test]
    fn floors_into_char_boundaries() {
        assert_eq!(floor_char_boundary(SAMPLE, 0), 0);
        assert_eq!(floor_char_boundary(SAMPLE, 3), 1);
        assert_eq!(floor_char_boundary(SAMPLE, 5), 5);
        assert_eq!(floor_char_boundary(SAMPLE, 6), 5);
        assert_eq!(floor_char_boundary(SAMPLE, 100), SAMPLE.len());
    }

    #[test]
    fn utf16_conversions() {
        assert_eq!(utf16_to_byte_offset(SAMPLE, 1), 1);
        assert_eq!(utf16_to_byte_offset(SAMPLE, 2), 1, "mid surrogate pair floors");
        assert_eq!(utf16_to_byte_offset(SAMPLE, 3), 5);
        assert_eq!(utf16_to_byte_offset(SAMPLE, 4), 7);
        assert_eq!(utf16_to_byte_offset(SAMPLE, 99), SAMPLE.len());

        assert_eq!(byte_to_utf16_offset(SAMPLE, 5), 3);
        assert_eq!(byte_to_utf16_offset(SAMPLE, 7), 4);
        assert_eq!(byte_to_utf16_offset(SAMPLE, SAMPLE.len()), 6);
    }

    #[test]
    fn char_conversions() {
        assert_eq!(char_to_byte_offset(SAMPLE, 2), 5);
        assert_eq!(char_to_byte_offset(SAMPLE, 5), SAMPLE.len());
        assert_eq!(byte_to_char_offset(SAMPLE, 7), 3);
    }

    #[test]
    fn spaces_round_trip_on_boundaries() {
        for space in [OffsetSpace::Utf8, OffsetSpace::Utf16, OffsetSpace::Chars] {
            for (byte_offset, _) in SAMPLE.char_indices() {
                let host = space.from_byte_offset(SAMPLE, byte_offset);
                assert_eq!(space.to_byte_offset(SAMPLE, host), byte_offset, "{space:?} at {byte_offset}");
            }
        }
    }

    #[test]
    fn deserializes_lowercase_names() {
        let space: OffsetSpace = serde_json::from_str("\"utf16\"").expect("deserialize");
        assert_eq!(space, OffsetSpace::Utf16);
    }
}
