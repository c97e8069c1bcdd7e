//! Text helpers behind the mention tagging engine.
//!
//! - `extraction`: whitespace word splitting and known-entity aware token extraction
//! - `cursor`: cursor-to-token location policies and mention classification
//! - `offsets`: conversions between UTF-8, UTF-16 and char offsets
//! - `entity`: shape checks for confirmed entities
//! - `paths`: config path resolution helpers

pub mod cursor;
pub mod entity;
pub mod extraction;
pub mod offsets;
pub mod paths;

pub use cursor::{CursorLocator, CursorPolicy, is_mention_text};
pub use entity::looks_like_email;
pub use extraction::{WordSpan, extract_tokens, extract_tokens_at_cursor, split_words};
pub use offsets::{OffsetSpace, floor_char_boundary};
pub use paths::{expand_tilde, path_from_env};
