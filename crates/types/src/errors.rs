//! Error types shared by extraction, editing and search.

use thiserror::Error;

/// Errors raised by the synchronous editing operations.
///
/// All of them are recoverable: the editing session keeps accepting edits
/// after any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MentionError {
    /// An extracted segment could not be found at or after the running search offset.
    #[error("segment '{segment}' not found at or after offset {search_from}")]
    MalformedRange { segment: String, search_from: usize },

    /// A selection was committed while no mention token was active.
    #[error("no active mention to replace")]
    NoActiveMention,

    /// An offset pointed outside the text it refers to.
    #[error("offset {offset} is out of bounds for text of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },
}

impl MentionError {
    pub fn malformed_range(segment: impl Into<String>, search_from: usize) -> Self {
        Self::MalformedRange {
            segment: segment.into(),
            search_from,
        }
    }

    pub fn offset_out_of_bounds(offset: usize, len: usize) -> Self {
        Self::OffsetOutOfBounds { offset, len }
    }
}

/// Failure of a search request. The display string becomes the `Failed` reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search text is empty")]
    EmptyQuery,

    #[error("{message}")]
    ProviderFailure { message: String },

    #[error("search for '{query}' timed out after {timeout_ms}ms")]
    Timeout { query: String, timeout_ms: u64 },
}

impl SearchError {
    /// Create a provider failure error.
    pub fn provider_failure(message: impl Into<String>) -> Self {
        Self::ProviderFailure { message: message.into() }
    }

    /// Create a timeout error.
    pub fn timeout(query: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            query: query.into(),
            timeout_ms,
        }
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{value}': expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError {
    pub value: String,
}
