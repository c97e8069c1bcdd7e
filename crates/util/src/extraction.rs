//! # Token Extraction
//!
//! Splits free-form text into whitespace-delimited words and then into tokens,
//! carving confirmed entities out of the words that embed them. Offsets are
//! UTF-8 byte offsets into the input text.

use mentions_types::{KnownEntitySet, MentionError, Token, TokenClassification, TokenId};
use tracing::trace;

use crate::cursor::{CursorPolicy, is_mention_text};

/// Whitespace-delimited word with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// The text content of the word
    pub text: &'a str,
    /// The starting byte position in the source text
    pub start: usize,
    /// The ending byte position in the source text (exclusive)
    pub end: usize,
}

/// Split `input` into maximal runs of non-whitespace characters.
///
/// Whitespace follows `char::is_whitespace`, so non-ASCII spaces separate
/// words too.
///
/// # Example
/// ```rust
/// use mentions_util::extraction::split_words;
///
/// let words = split_words("hi  @al\tthere");
/// assert_eq!(words.len(), 3);
/// assert_eq!(words[1].text, "@al");
/// assert_eq!(words[1].start, 4);
/// assert_eq!(words[1].end, 7);
/// ```
pub fn split_words(input: &str) -> Vec<WordSpan<'_>> {
    let mut words = Vec::new();
    let mut word_start: Option<usize> = None;

    for (index, character) in input.char_indices() {
        match (character.is_whitespace(), word_start) {
            (true, Some(start)) => {
                words.push(WordSpan {
                    text: &input[start..index],
                    start,
                    end: index,
                });
                word_start = None;
            }
            (false, None) => word_start = Some(index),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        words.push(WordSpan {
            text: &input[start..],
            start,
            end: input.len(),
        });
    }

    words
}

/// Extract the ordered token sequence of `text`.
///
/// Every word is checked for an embedded known entity. A match splits the word
/// into an optional prefix, the entity itself (`TaggedEntity`) and an optional
/// suffix; words without a match become a single token, classified `Mention`
/// when it reads as an in-progress mention and `Plain` otherwise.
///
/// When several entities occur in the same word the longest wins, then the one
/// confirmed first, at its leftmost occurrence.
///
/// # Errors
/// Returns [`MentionError::MalformedRange`] if a segment cannot be located by
/// forward search from the end of the previous token. This does not happen for
/// segments produced from the text itself; it guards the range invariant.
///
/// # Example
/// ```rust
/// use mentions_types::{KnownEntitySet, TokenClassification};
/// use mentions_util::extraction::extract_tokens;
///
/// let entities: KnownEntitySet = ["user1@example.com"].into_iter().collect();
/// let tokens = extract_tokens("hello user1@example.com bye", &entities).unwrap();
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["hello", "user1@example.com", "bye"]);
/// assert_eq!(tokens[1].classification, TokenClassification::TaggedEntity);
/// assert_eq!(tokens[1].start, 6);
/// ```
pub fn extract_tokens(text: &str, entities: &KnownEntitySet) -> Result<Vec<Token>, MentionError> {
    extract_tokens_at_cursor(text, entities, None)
}

/// Extract tokens and mark the one the cursor occupies.
///
/// The under-cursor flag follows [`CursorPolicy::HighlightEdit`]: a cursor
/// resting on a token's left edge does not mark it.
pub fn extract_tokens_at_cursor(text: &str, entities: &KnownEntitySet, cursor: Option<usize>) -> Result<Vec<Token>, MentionError> {
    let mut tokens = Vec::new();
    let mut search_from = 0usize;

    for word in split_words(text) {
        for (segment, classification) in split_word(word.text, entities) {
            let start = locate_segment(text, segment, search_from, &word)?;
            let token = build_token(TokenId(tokens.len()), segment, start, classification, cursor);
            search_from = token.end();
            tokens.push(token);
        }
    }

    trace!(token_count = tokens.len(), text_len = text.len(), "extracted tokens");
    Ok(tokens)
}

/// Split one word into classified segments around at most one known entity.
fn split_word<'w>(word: &'w str, entities: &KnownEntitySet) -> Vec<(&'w str, TokenClassification)> {
    let Some((position, length)) = best_entity_match(word, entities) else {
        return vec![(word, TokenClassification::Plain)];
    };

    let mut segments = Vec::with_capacity(3);
    let prefix = &word[..position];
    let entity = &word[position..position + length];
    let suffix = &word[position + length..];
    if !prefix.is_empty() {
        segments.push((prefix, TokenClassification::Plain));
    }
    segments.push((entity, TokenClassification::TaggedEntity));
    if !suffix.is_empty() {
        segments.push((suffix, TokenClassification::Plain));
    }
    segments
}

/// Find the entity to carve out of `word` as `(byte position, byte length)`.
fn best_entity_match(word: &str, entities: &KnownEntitySet) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None; // (length, confirmed_at, position)

    for (confirmed_at, entity) in entities.iter_distinct() {
        if entity.is_empty() {
            continue;
        }
        let Some(position) = word.find(entity) else {
            continue;
        };
        let candidate = (entity.len(), confirmed_at, position);
        best = match best {
            Some(current) if current.0 > candidate.0 || (current.0 == candidate.0 && current.1 <= candidate.1) => Some(current),
            _ => Some(candidate),
        };
    }

    best.map(|(length, _, position)| (position, length))
}

/// Locate `segment` by literal forward search and check it stays inside its word.
fn locate_segment(text: &str, segment: &str, search_from: usize, word: &WordSpan<'_>) -> Result<usize, MentionError> {
    let start = text
        .get(search_from..)
        .and_then(|rest| rest.find(segment))
        .map(|relative| relative + search_from)
        .filter(|start| *start >= word.start && start + segment.len() <= word.end)
        .ok_or_else(|| MentionError::malformed_range(segment, search_from))?;
    Ok(start)
}

fn build_token(id: TokenId, segment: &str, start: usize, classification: TokenClassification, cursor: Option<usize>) -> Token {
    let classification = match classification {
        TokenClassification::Plain if is_mention_text(segment) => TokenClassification::Mention,
        other => other,
    };
    let mut token = Token {
        id,
        text: segment.to_string(),
        start,
        length: segment.len(),
        classification,
        is_under_cursor: false,
    };
    token.is_under_cursor = cursor.is_some_and(|cursor| CursorPolicy::HighlightEdit.contains(&token, cursor));
    token
}
