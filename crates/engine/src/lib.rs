//! # Mentions Engine
//!
//! The engine turns a plain text surface into a mention-aware editor: it
//! tokenizes the text as it changes, detects an in-progress `@mention` under
//! the cursor, searches for candidate entities, commits a chosen candidate
//! back into the text and then treats that entity as an atomic, highlighted
//! unit.
//!
//! ## Usage
//!
//! ```rust
//! use mentions_engine::{EditorConfig, EditorState};
//!
//! let mut editor = EditorState::new(&EditorConfig::default());
//! let request = editor.apply_text_change("hi @al", 6)?.expect("mention opens a search");
//! assert_eq!(request.query, "al");
//!
//! let outcome = editor.commit_selection("alice@example.com")?;
//! assert_eq!(outcome.text, "hi alice@example.com ");
//! assert_eq!(editor.postable_text()?, "hi @[alice@example.com](user:0) ");
//! # Ok::<(), mentions_engine::MentionError>(())
//! ```
//!
//! ## Architecture
//!
//! - **`editor`**: [`EditorState`] and its four operations
//! - **`highlight`**: ordered first-match-wins style rules
//! - **`guard`**: atomic replacement of confirmed entities
//! - **`commit`**: selection commit and the postable form
//! - **`search`**: provider contract, built-in providers and the generation-guarded workflow
//! - **`session`**: [`MentionSession`], the tokio driver around an editor and a provider
//! - **`config`**: [`EditorConfig`] loading and validation

pub mod commit;
pub mod config;
pub mod confirmed;
pub mod editor;
pub mod guard;
pub mod highlight;
pub mod search;
pub mod session;

pub use commit::{CommitOutcome, to_postable_form};
pub use config::{ConfigError, EditorConfig, HighlightPalette, load_config, load_config_from_path};
pub use confirmed::ConfirmedEntities;
pub use editor::EditorState;
pub use guard::{EditDecision, EditGuard};
pub use highlight::{HighlightDispatcher, HighlightRule};
pub use mentions_types::{HighlightKind, HighlightedSpan, KnownEntitySet, MentionError, SearchError, SearchState, StyledRun, Token};
pub use mentions_util::OffsetSpace;
pub use search::{
    NullSearchProvider, SearchCache, SearchCompletion, SearchProvider, SearchRequest, SearchWorkflow, StaticDirectoryProvider, execute_search,
};
pub use session::MentionSession;
