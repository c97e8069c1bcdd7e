use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Character that opens an in-progress mention.
pub const MENTION_TRIGGER: char = '@';

/// Identifier of a token within one extraction pass.
///
/// The value is the token's ordinal in the pass, so extracting the same
/// input twice yields equal identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub usize);

/// Classification assigned to a token during extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenClassification {
    /// Ordinary word (or word fragment around a tagged entity)
    #[default]
    Plain,
    /// `@`-prefixed token with no further `@`
    Mention,
    /// Text that matches a confirmed entity
    TaggedEntity,
}

/// One non-whitespace segment of the edited text.
///
/// Offsets are UTF-8 byte offsets into the text the token was extracted from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: TokenId,
    /// The exact text of the segment
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Length in bytes
    pub length: usize,
    pub classification: TokenClassification,
    /// Whether the cursor sits inside this token under the highlight policy
    pub is_under_cursor: bool,
}

impl Token {
    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_mention(&self) -> bool {
        self.classification == TokenClassification::Mention
    }

    pub fn is_tagged_entity(&self) -> bool {
        self.classification == TokenClassification::TaggedEntity
    }

    /// Search text carried by a mention token: its text without the leading `@`.
    ///
    /// Returns `None` for tokens that are not classified as mentions.
    pub fn mention_query(&self) -> Option<&str> {
        if !self.is_mention() {
            return None;
        }
        self.text.strip_prefix(MENTION_TRIGGER)
    }
}
