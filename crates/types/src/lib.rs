//! Shared value types for the mention tagging engine.
//!
//! Everything in this crate is plain data: tokens produced by extraction, the
//! confirmed-entity registry, search session state, highlight styles and the
//! error enums surfaced by the utility and engine crates.

mod entities;
mod errors;
mod search;
mod style;
mod token;

pub use entities::KnownEntitySet;
pub use errors::{ColorParseError, MentionError, SearchError};
pub use search::{SearchSession, SearchState};
pub use style::{HighlightKind, HighlightedSpan, Rgba, StyledRun, TokenStyle};
pub use token::{MENTION_TRIGGER, Token, TokenClassification, TokenId};
