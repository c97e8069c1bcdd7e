//! Committing a chosen candidate and rendering the postable form.

use std::ops::Range;

use mentions_types::{MentionError, Token};
use tracing::debug;

use crate::confirmed::ConfirmedEntities;

/// Result of replacing the active mention with a chosen entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitOutcome {
    pub text: String,
    /// Cursor just after the separator that follows the entity.
    pub cursor: usize,
    /// Range of the mention token that was replaced, in the pre-commit text.
    pub replaced: Range<usize>,
    pub entity: String,
}

/// Separator inserted after a committed entity.
pub const COMMIT_SEPARATOR: char = ' ';

/// Replace `mention` in `text` with `entity` followed by a space.
///
/// # Errors
/// Returns [`MentionError::MalformedRange`] when `mention` no longer describes
/// `text` (the text changed since the token was extracted).
pub fn commit_selection(text: &str, mention: &Token, entity: &str) -> Result<CommitOutcome, MentionError> {
    let replaced = mention.range();
    if text.get(replaced.clone()) != Some(mention.text.as_str()) {
        return Err(MentionError::malformed_range(mention.text.clone(), mention.start));
    }

    let mut updated = String::with_capacity(text.len() - mention.length + entity.len() + 1);
    updated.push_str(&text[..replaced.start]);
    updated.push_str(entity);
    updated.push(COMMIT_SEPARATOR);
    updated.push_str(&text[replaced.end..]);

    let cursor = replaced.start + entity.len() + COMMIT_SEPARATOR.len_utf8();
    debug!(entity, mention = %mention.text, cursor, "committed selection");
    Ok(CommitOutcome {
        text: updated,
        cursor,
        replaced,
        entity: entity.to_string(),
    })
}

/// Render `text` for posting: every confirmed entity token becomes
/// `@[entity](user:index)`, where `index` is the entity's first position in
/// the known-entity sequence. Everything else is copied verbatim.
///
/// Replacement is by token range, so an entity text that also occurs inside
/// an unrelated word is left alone there.
///
/// # Errors
/// Returns [`MentionError::MalformedRange`] when an entity token does not
/// describe `text` or the tokens are out of order.
pub fn to_postable_form(text: &str, tokens: &[Token], confirmed: &ConfirmedEntities<'_>) -> Result<String, MentionError> {
    let mut output = String::with_capacity(text.len());
    let mut position = 0usize;

    for token in tokens.iter().filter(|token| confirmed.is_confirmed_token(token)) {
        let Some(index) = confirmed.entities().first_index(&token.text) else {
            continue;
        };
        if token.start < position || text.get(token.range()) != Some(token.text.as_str()) {
            return Err(MentionError::malformed_range(token.text.clone(), position));
        }
        output.push_str(&text[position..token.start]);
        output.push_str(&format!("@[{}](user:{index})", token.text));
        position = token.end();
    }

    output.push_str(&text[position..]);
    Ok(output)
}
