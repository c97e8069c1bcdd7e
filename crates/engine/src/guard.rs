//! Atomic treatment of confirmed entities during editing.
//!
//! An edit whose range starts strictly inside a confirmed entity must not
//! leave a fragment of it behind. Instead the whole entity is replaced by the
//! pending replacement (a deletion removes it outright) and the cursor is
//! placed explicitly, since the host's own cursor bookkeeping no longer
//! matches the text.

use std::ops::Range;

use mentions_types::MentionError;
use mentions_util::CursorLocator;
use tracing::debug;

use crate::confirmed::ConfirmedEntities;

/// Verdict for a pending edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditDecision {
    /// Let the host apply the edit unmodified.
    Apply,
    /// The host must discard its edit and adopt `text` and `cursor`.
    Replace {
        text: String,
        cursor: usize,
        /// Entity range that was replaced, in the pre-edit text.
        replaced: Range<usize>,
    },
}

impl EditDecision {
    pub fn is_apply(&self) -> bool {
        matches!(self, Self::Apply)
    }
}

/// Edit interceptor for confirmed entities.
#[derive(Clone, Copy, Debug)]
pub struct EditGuard<'a> {
    confirmed: ConfirmedEntities<'a>,
}

impl<'a> EditGuard<'a> {
    pub fn new(confirmed: ConfirmedEntities<'a>) -> Self {
        Self { confirmed }
    }

    /// Decide whether the edit of `pending` with `replacement` may proceed.
    ///
    /// `locator` must describe `current_text`. Offsets are UTF-8 byte offsets.
    ///
    /// # Errors
    /// Returns [`MentionError::OffsetOutOfBounds`] when `pending` does not lie
    /// within `current_text` on character boundaries, and
    /// [`MentionError::MalformedRange`] when the intercepted entity token does
    /// not describe `current_text`.
    pub fn should_apply(
        &self,
        pending: Range<usize>,
        replacement: &str,
        current_text: &str,
        locator: &CursorLocator<'_>,
    ) -> Result<EditDecision, MentionError> {
        validate_range(&pending, current_text)?;

        let Some(entity) = locator
            .interior(pending.start)
            .filter(|token| self.confirmed.is_confirmed_token(token))
        else {
            return Ok(EditDecision::Apply);
        };

        let replaced = entity.range();
        if current_text.get(replaced.clone()) != Some(entity.text.as_str()) {
            return Err(MentionError::malformed_range(entity.text.clone(), entity.start));
        }
        let mut text = String::with_capacity(current_text.len() - entity.length + replacement.len());
        text.push_str(&current_text[..replaced.start]);
        text.push_str(replacement);
        text.push_str(&current_text[replaced.end..]);

        let cursor = replaced.start + replacement.chars().next().map_or(0, char::len_utf8);
        debug!(
            entity = %entity.text,
            start = replaced.start,
            replacement_len = replacement.len(),
            "replaced confirmed entity atomically"
        );
        Ok(EditDecision::Replace { text, cursor, replaced })
    }
}

fn validate_range(range: &Range<usize>, text: &str) -> Result<(), MentionError> {
    for offset in [range.start, range.end] {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return Err(MentionError::offset_out_of_bounds(offset, text.len()));
        }
    }
    if range.start > range.end {
        return Err(MentionError::offset_out_of_bounds(range.start, range.end));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mentions_types::{KnownEntitySet, Token};
    use mentions_util::extract_tokens;

    use super::*;

    const TEXT: &str = "hello test@example.com bye";

    fn entities() -> KnownEntitySet {
        ["test@example.com"].into_iter().collect()
    }

    fn decide(tokens: &[Token], entities: &KnownEntitySet, range: Range<usize>, replacement: &str) -> EditDecision {
        let guard = EditGuard::new(ConfirmedEntities::new(entities, false));
        guard
            .should_apply(range, replacement, TEXT, &CursorLocator::new(tokens))
            .expect("valid range")
    }

    #[test]
    fn deletion_inside_entity_removes_it_whole() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        assert_eq!(
            decide(&tokens, &entities, 10..11, ""),
            EditDecision::Replace {
                text: "hello  bye".into(),
                cursor: 6,
                replaced: 6..22,
            }
        );
    }

    #[test]
    fn typing_inside_entity_replaces_it() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        assert_eq!(
            decide(&tokens, &entities, 9..9, "x"),
            EditDecision::Replace {
                text: "hello x bye".into(),
                cursor: 7,
                replaced: 6..22,
            }
        );
    }

    #[test]
    fn cursor_follows_first_inserted_character() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        let EditDecision::Replace { cursor, .. } = decide(&tokens, &entities, 12..12, "éa") else {
            panic!("expected replacement");
        };
        assert_eq!(cursor, 6 + 'é'.len_utf8());
    }

    #[test]
    fn edits_on_entity_edges_apply_unmodified() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        assert!(decide(&tokens, &entities, 6..6, "x").is_apply());
        assert!(decide(&tokens, &entities, 22..22, "x").is_apply());
        assert!(!decide(&tokens, &entities, 21..22, "").is_apply());
    }

    #[test]
    fn plain_tokens_are_editable() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        assert!(decide(&tokens, &entities, 2..3, "").is_apply());
        assert!(decide(&tokens, &entities, 24..24, "!").is_apply());
    }

    #[test]
    fn unconfirmed_email_is_editable() {
        let entities = KnownEntitySet::new();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        assert!(decide(&tokens, &entities, 10..11, "").is_apply());
    }

    #[test]
    fn tokens_of_other_text_are_rejected() {
        let entities = entities();
        let tokens = extract_tokens("a much longer prefix test@example.com", &entities).unwrap();
        let guard = EditGuard::new(ConfirmedEntities::new(&entities, false));
        let result = guard.should_apply(24..25, "", TEXT, &CursorLocator::new(&tokens));
        assert!(matches!(result, Err(MentionError::MalformedRange { .. })), "{result:?}");
    }

    #[test]
    fn rejects_ranges_outside_text() {
        let entities = entities();
        let tokens = extract_tokens(TEXT, &entities).unwrap();
        let guard = EditGuard::new(ConfirmedEntities::new(&entities, false));
        let locator = CursorLocator::new(&tokens);
        assert_eq!(
            guard.should_apply(20..40, "", TEXT, &locator),
            Err(MentionError::offset_out_of_bounds(40, TEXT.len()))
        );
        assert!(guard.should_apply(5..3, "", TEXT, &locator).is_err());
    }
}
