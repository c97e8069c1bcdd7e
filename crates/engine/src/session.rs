//! Async driver that connects an [`EditorState`] to a [`SearchProvider`].
//!
//! Provider calls run on spawned tokio tasks and report back over an
//! unbounded channel. Every task reports exactly once: a provider that panics
//! still yields a failed completion for its generation. Only one call is in
//! flight at a time: starting a new request aborts the previous task, and
//! anything that still slips through is dropped by the workflow's generation
//! check. Must be used inside a tokio runtime.

use std::{ops::Range, sync::Arc, time::Duration};

use mentions_types::{MentionError, SearchError, SearchState};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    commit::CommitOutcome,
    config::EditorConfig,
    editor::EditorState,
    guard::EditDecision,
    search::{SearchCache, SearchCompletion, SearchProvider, SearchRequest, execute_search},
};

/// Reports a failure for `request` when dropped before being filled, which
/// happens when the search task panics or is aborted.
struct CompletionSlot {
    sender: UnboundedSender<SearchCompletion>,
    request: Option<SearchRequest>,
}

impl CompletionSlot {
    fn new(sender: UnboundedSender<SearchCompletion>, request: SearchRequest) -> Self {
        Self {
            sender,
            request: Some(request),
        }
    }

    fn fill(mut self, completion: SearchCompletion) {
        self.request = None;
        if self.sender.send(completion).is_err() {
            debug!("session dropped before search completed");
        }
    }
}

impl Drop for CompletionSlot {
    fn drop(&mut self) {
        let Some(request) = self.request.take() else {
            return;
        };
        debug!(query = %request.query, generation = request.generation, "search task ended without a result");
        let failure = request.complete(Err(SearchError::provider_failure("search provider stopped without a result")));
        let _ = self.sender.send(failure);
    }
}

#[derive(Debug)]
struct InFlightSearch {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
pub struct MentionSession {
    editor: EditorState,
    provider: Arc<dyn SearchProvider>,
    cache: SearchCache,
    timeout: Option<Duration>,
    completion_sender: UnboundedSender<SearchCompletion>,
    completion_receiver: UnboundedReceiver<SearchCompletion>,
    in_flight: Option<InFlightSearch>,
}

impl MentionSession {
    pub fn new(config: &EditorConfig, provider: Arc<dyn SearchProvider>) -> Self {
        Self::with_editor(EditorState::new(config), config, provider)
    }

    /// Drive an existing editor state, e.g. one seeded with known entities.
    pub fn with_editor(editor: EditorState, config: &EditorConfig, provider: Arc<dyn SearchProvider>) -> Self {
        let (completion_sender, completion_receiver) = unbounded_channel();
        Self {
            editor,
            provider,
            cache: SearchCache::new(config.cache_ttl()),
            timeout: config.search_timeout(),
            completion_sender,
            completion_receiver,
            in_flight: None,
        }
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub fn search_state(&self) -> &SearchState {
        self.editor.search_state()
    }

    /// Whether a provider call is outstanding.
    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn text_changed(&mut self, text: impl Into<String>, cursor: usize) -> Result<(), MentionError> {
        let request = self.editor.apply_text_change(text, cursor)?;
        self.after_operation(request);
        Ok(())
    }

    pub fn cursor_moved(&mut self, cursor: usize) -> Result<(), MentionError> {
        let request = self.editor.apply_cursor_change(cursor)?;
        self.after_operation(request);
        Ok(())
    }

    pub fn guard_edit(&mut self, range: Range<usize>, replacement: &str) -> Result<EditDecision, MentionError> {
        let decision = self.editor.guard_edit(range, replacement)?;
        let request = self.editor.take_search_request();
        self.after_operation(request);
        Ok(decision)
    }

    pub fn select(&mut self, entity: &str) -> Result<CommitOutcome, MentionError> {
        let outcome = self.editor.commit_selection(entity)?;
        self.cancel_in_flight();
        Ok(outcome)
    }

    /// Wait for the outstanding provider call and apply its result.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// completion changed the search state.
    pub async fn next_completion(&mut self) -> Option<bool> {
        self.in_flight.as_ref()?;
        let completion = self.completion_receiver.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Apply every completion that has already arrived, without waiting.
    ///
    /// Returns how many of them changed the search state.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_receiver.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    fn after_operation(&mut self, request: Option<SearchRequest>) {
        match request {
            Some(request) => self.dispatch(request),
            None if !self.editor.search_state().is_fetching() => self.cancel_in_flight(),
            None => {}
        }
    }

    fn dispatch(&mut self, request: SearchRequest) {
        self.cancel_in_flight();

        if let Some(items) = self.cache.lookup_fresh(&request.query) {
            debug!(query = %request.query, generation = request.generation, "search served from cache");
            self.editor.apply_search_completion(request.complete(Ok(items)));
            return;
        }

        let provider = Arc::clone(&self.provider);
        let sender = self.completion_sender.clone();
        let timeout = self.timeout;
        let generation = request.generation;
        let handle = tokio::spawn(async move {
            let slot = CompletionSlot::new(sender, request.clone());
            let completion = execute_search(provider.as_ref(), &request, timeout).await;
            slot.fill(completion);
        });
        self.in_flight = Some(InFlightSearch { generation, handle });
    }

    fn apply_completion(&mut self, completion: SearchCompletion) -> bool {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == completion.generation)
        {
            self.in_flight = None;
        }
        if let Ok(items) = &completion.outcome
            && !completion.query.is_empty()
        {
            self.cache.store(completion.query.clone(), items.clone());
        }
        self.editor.apply_search_completion(completion)
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(generation = in_flight.generation, "aborting superseded search");
            in_flight.handle.abort();
        }
    }
}

impl Drop for MentionSession {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
