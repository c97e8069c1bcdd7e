//! Cursor-to-token location and mention classification.
//!
//! Two boundary policies exist because two callers disagree on what "inside a
//! token" means at its left edge. Mention detection accepts a cursor on either
//! edge; highlighting and edit interception require the cursor to be strictly
//! past the token's start.

use mentions_types::{MENTION_TRIGGER, Token};

/// Boundary policy used to decide whether a cursor occupies a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorPolicy {
    /// `start <= cursor <= end`
    MentionDetection,
    /// `start < cursor <= end`
    HighlightEdit,
}

impl CursorPolicy {
    pub fn contains(self, token: &Token, cursor: usize) -> bool {
        let within_right_edge = cursor <= token.end();
        match self {
            Self::MentionDetection => cursor >= token.start && within_right_edge,
            Self::HighlightEdit => cursor > token.start && within_right_edge,
        }
    }
}

/// Read-only view over one extraction pass for cursor queries.
#[derive(Clone, Copy, Debug)]
pub struct CursorLocator<'a> {
    tokens: &'a [Token],
}

impl<'a> CursorLocator<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// First token (in extraction order) that holds `cursor` under `policy`.
    pub fn locate(&self, cursor: usize, policy: CursorPolicy) -> Option<&'a Token> {
        self.tokens.iter().find(|token| policy.contains(token, cursor))
    }

    /// Mention token the cursor occupies under the mention-detection policy.
    pub fn active_mention(&self, cursor: usize) -> Option<&'a Token> {
        self.locate(cursor, CursorPolicy::MentionDetection)
            .filter(|token| token.is_mention())
    }

    /// Token whose interior (`start < offset < end`) contains `offset`.
    ///
    /// Used by edit interception: an edit starting on either edge of a token
    /// does not split it.
    pub fn interior(&self, offset: usize) -> Option<&'a Token> {
        self.locate(offset, CursorPolicy::HighlightEdit)
            .filter(|token| offset < token.end())
    }
}

/// Whether `text` reads as an in-progress mention: `@` followed by no further `@`.
pub fn is_mention_text(text: &str) -> bool {
    text.strip_prefix(MENTION_TRIGGER)
        .is_some_and(|rest| !rest.contains(MENTION_TRIGGER))
}
