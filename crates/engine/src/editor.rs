//! # Editor State
//!
//! [`EditorState`] is the single owner of the editing session: the text, the
//! cursor, the confirmed entities, the active mention and the search
//! lifecycle. The text surface drives it through four operations:
//!
//! - [`EditorState::apply_text_change`] after every edit
//! - [`EditorState::apply_cursor_change`] when only the cursor moved
//! - [`EditorState::guard_edit`] before an edit is applied
//! - [`EditorState::commit_selection`] when a candidate was picked
//!
//! Everything else (tokens, highlights, postable text) is derived on demand.
//!
//! Cursor offsets, edit ranges, spans and runs exchanged with the host are in
//! the configured [`OffsetSpace`]. Tokens keep UTF-8 byte offsets into
//! [`EditorState::text`]. Incoming offsets are clamped to the text and floored
//! to a character boundary.

use std::ops::Range;

use mentions_types::{HighlightedSpan, KnownEntitySet, MentionError, SearchSession, SearchState, StyledRun, Token};
use mentions_util::{CursorLocator, OffsetSpace, extract_tokens_at_cursor};
use tracing::{debug, info};

use crate::{
    commit::{CommitOutcome, commit_selection, to_postable_form},
    config::EditorConfig,
    confirmed::ConfirmedEntities,
    guard::{EditDecision, EditGuard},
    highlight::HighlightDispatcher,
    search::{SearchCompletion, SearchRequest, SearchWorkflow},
};

#[derive(Clone, Debug)]
pub struct EditorState {
    text: String,
    /// Byte offset into `text`.
    cursor: usize,
    known_entities: KnownEntitySet,
    active_mention: Option<Token>,
    /// Byte offset the host must adopt on its next refresh.
    pending_cursor_override: Option<usize>,
    queued_search: Option<SearchRequest>,
    search: SearchWorkflow,
    dispatcher: HighlightDispatcher,
    offset_space: OffsetSpace,
    require_email_shape: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            known_entities: KnownEntitySet::new(),
            active_mention: None,
            pending_cursor_override: None,
            queued_search: None,
            search: SearchWorkflow::new(),
            dispatcher: HighlightDispatcher::from_palette(&config.palette),
            offset_space: config.offset_space,
            require_email_shape: config.require_email_shape,
        }
    }

    /// Seed the confirmed entities, e.g. when restoring a draft.
    pub fn with_known_entities(mut self, entities: KnownEntitySet) -> Self {
        self.known_entities = entities;
        self
    }

    // ----- selectors -----

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor in the host's offset space.
    pub fn cursor(&self) -> usize {
        self.to_host(self.cursor)
    }

    pub fn known_entities(&self) -> &KnownEntitySet {
        &self.known_entities
    }

    pub fn active_mention(&self) -> Option<&Token> {
        self.active_mention.as_ref()
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn search_session(&self) -> &SearchSession {
        self.search.session()
    }

    pub fn offset_space(&self) -> OffsetSpace {
        self.offset_space
    }

    /// Cursor override awaiting the host, without consuming it.
    pub fn pending_cursor_override(&self) -> Option<usize> {
        self.pending_cursor_override.map(|cursor| self.to_host(cursor))
    }

    /// Consume the cursor position the host must adopt, if any.
    pub fn take_cursor_override(&mut self) -> Option<usize> {
        self.pending_cursor_override.take().map(|cursor| self.to_host(cursor))
    }

    /// Consume the search request raised by [`Self::guard_edit`].
    ///
    /// Only the most recent operation's request is kept; any later operation
    /// discards it.
    pub fn take_search_request(&mut self) -> Option<SearchRequest> {
        self.queued_search.take()
    }

    /// Token sequence of the current text, with the under-cursor flag set.
    pub fn tokens(&self) -> Result<Vec<Token>, MentionError> {
        extract_tokens_at_cursor(&self.text, &self.known_entities, Some(self.cursor))
    }

    pub fn highlighted_spans(&self) -> Result<Vec<HighlightedSpan>, MentionError> {
        let tokens = self.tokens()?;
        let spans = self.dispatcher.highlight(&tokens, self.cursor, &self.confirmed());
        Ok(spans
            .into_iter()
            .map(|span| {
                let range = self.host_range(span.start..span.start + span.length);
                HighlightedSpan {
                    start: range.start,
                    length: range.len(),
                    ..span
                }
            })
            .collect())
    }

    /// Styled partition of the whole text, ready to render.
    pub fn styled_runs(&self) -> Result<Vec<StyledRun>, MentionError> {
        let tokens = self.tokens()?;
        let runs = self.dispatcher.styled_runs(&self.text, &tokens, self.cursor, &self.confirmed());
        Ok(runs
            .into_iter()
            .map(|run| {
                let range = self.host_range(run.start..run.start + run.length);
                StyledRun {
                    start: range.start,
                    length: range.len(),
                    ..run
                }
            })
            .collect())
    }

    /// Text with every confirmed entity rewritten as `@[entity](user:index)`.
    pub fn postable_text(&self) -> Result<String, MentionError> {
        let tokens = self.tokens()?;
        to_postable_form(&self.text, &tokens, &self.confirmed())
    }

    // ----- operations -----

    /// The text surface reported an edit.
    ///
    /// Returns the provider call to make, if the active mention needs one.
    pub fn apply_text_change(&mut self, text: impl Into<String>, cursor: usize) -> Result<Option<SearchRequest>, MentionError> {
        self.text = text.into();
        self.cursor = self.offset_space.to_byte_offset(&self.text, cursor);
        self.refresh_mention()
    }

    /// The cursor moved without a text change.
    pub fn apply_cursor_change(&mut self, cursor: usize) -> Result<Option<SearchRequest>, MentionError> {
        self.cursor = self.offset_space.to_byte_offset(&self.text, cursor);
        self.refresh_mention()
    }

    /// Intercept a pending edit of `range` (host offsets) with `replacement`.
    ///
    /// A forced replacement is applied to this state immediately: the text
    /// changes, a cursor override is queued and the mention is re-evaluated
    /// (see [`Self::take_search_request`]). The returned decision carries
    /// host offsets.
    pub fn guard_edit(&mut self, range: Range<usize>, replacement: &str) -> Result<EditDecision, MentionError> {
        self.queued_search = None;
        let pending = self.to_byte_range(range);
        let tokens = extract_tokens_at_cursor(&self.text, &self.known_entities, None)?;
        let guard = EditGuard::new(self.confirmed());
        let decision = guard.should_apply(pending, replacement, &self.text, &CursorLocator::new(&tokens))?;

        let EditDecision::Replace { text, cursor, replaced } = decision else {
            return Ok(EditDecision::Apply);
        };

        let host_replaced = self.host_range(replaced);
        self.text = text.clone();
        self.cursor = cursor;
        self.pending_cursor_override = Some(cursor);
        self.queued_search = self.refresh_mention()?;
        Ok(EditDecision::Replace {
            text,
            cursor: self.to_host(cursor),
            replaced: host_replaced,
        })
    }

    /// Replace the active mention with `entity` and confirm it.
    ///
    /// # Errors
    /// [`MentionError::NoActiveMention`] when no mention is active, or
    /// [`MentionError::MalformedRange`] when the mention no longer matches the
    /// text.
    pub fn commit_selection(&mut self, entity: &str) -> Result<CommitOutcome, MentionError> {
        self.queued_search = None;
        let mention = self.active_mention.as_ref().ok_or(MentionError::NoActiveMention)?;
        let outcome = commit_selection(&self.text, mention, entity)?;
        let host_replaced = self.host_range(outcome.replaced.clone());

        self.text = outcome.text.clone();
        self.cursor = outcome.cursor;
        self.pending_cursor_override = Some(outcome.cursor);
        self.known_entities.insert(entity);
        self.active_mention = None;
        self.search.reset();
        info!(entity, entity_count = self.known_entities.len(), "entity confirmed");

        Ok(CommitOutcome {
            cursor: self.to_host(outcome.cursor),
            replaced: host_replaced,
            ..outcome
        })
    }

    /// Apply a provider response; stale responses are ignored.
    pub fn apply_search_completion(&mut self, completion: SearchCompletion) -> bool {
        self.search.resolve(completion)
    }

    /// Stop treating `entity` as confirmed and re-evaluate the mention.
    pub fn forget_entity(&mut self, entity: &str) -> Result<Option<SearchRequest>, MentionError> {
        let removed = self.known_entities.remove(entity);
        debug!(entity, removed, "entity forgotten");
        self.refresh_mention()
    }

    fn refresh_mention(&mut self) -> Result<Option<SearchRequest>, MentionError> {
        self.queued_search = None;
        let tokens = extract_tokens_at_cursor(&self.text, &self.known_entities, Some(self.cursor))?;
        let active = CursorLocator::new(&tokens).active_mention(self.cursor).cloned();

        let Some(mention) = active else {
            if self.active_mention.take().is_some() {
                debug!("mention closed");
            }
            self.search.reset();
            return Ok(None);
        };

        let query = mention.mention_query().unwrap_or_default().to_string();
        self.active_mention = Some(mention);
        Ok(self.search.request_for(&query))
    }

    fn confirmed(&self) -> ConfirmedEntities<'_> {
        ConfirmedEntities::new(&self.known_entities, self.require_email_shape)
    }

    fn to_host(&self, byte_offset: usize) -> usize {
        self.offset_space.from_byte_offset(&self.text, byte_offset)
    }

    fn host_range(&self, range: Range<usize>) -> Range<usize> {
        self.to_host(range.start)..self.to_host(range.end)
    }

    fn to_byte_range(&self, range: Range<usize>) -> Range<usize> {
        self.offset_space.to_byte_offset(&self.text, range.start)..self.offset_space.to_byte_offset(&self.text, range.end)
    }
}
