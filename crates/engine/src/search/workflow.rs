//! Search lifecycle: `Idle -> Fetching -> Fetched | Failed`.
//!
//! Every new request, and every abandonment of a request, bumps a generation
//! counter. A completion is applied only while the workflow is `Fetching` and
//! the completion carries the current generation, so a slow response to an
//! old query can never overwrite the state of a newer one.

use mentions_types::{SearchError, SearchSession, SearchState};
use tracing::debug;

/// A provider call the caller must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    /// Query without the leading `@`; may be empty.
    pub query: String,
}

impl SearchRequest {
    /// Completion for this request carrying `outcome`.
    pub fn complete(&self, outcome: Result<Vec<String>, SearchError>) -> SearchCompletion {
        SearchCompletion {
            generation: self.generation,
            query: self.query.clone(),
            outcome,
        }
    }
}

/// Provider response tagged with the request it answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCompletion {
    pub generation: u64,
    pub query: String,
    pub outcome: Result<Vec<String>, SearchError>,
}

#[derive(Clone, Debug, Default)]
pub struct SearchWorkflow {
    session: SearchSession,
}

impl SearchWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn state(&self) -> &SearchState {
        &self.session.state
    }

    pub fn generation(&self) -> u64 {
        self.session.generation
    }

    /// Start a new request for `query`, superseding any in flight.
    pub fn begin(&mut self, query: &str) -> SearchRequest {
        self.session.generation += 1;
        self.session.query = query.to_string();
        self.session.state = SearchState::Fetching;
        debug!(query, generation = self.session.generation, "search started");
        SearchRequest {
            generation: self.session.generation,
            query: self.session.query.clone(),
        }
    }

    /// Start a request unless `query` is already being fetched or was fetched.
    ///
    /// A failed query is retried.
    pub fn request_for(&mut self, query: &str) -> Option<SearchRequest> {
        let settled = matches!(self.session.state, SearchState::Fetching | SearchState::Fetched(_));
        if settled && self.session.query == query {
            return None;
        }
        Some(self.begin(query))
    }

    /// Abandon the current request and return to `Idle`.
    pub fn reset(&mut self) {
        if self.session.state.is_idle() {
            return;
        }
        self.session.generation += 1;
        self.session.query.clear();
        self.session.state = SearchState::Idle;
        debug!(generation = self.session.generation, "search reset");
    }

    /// Apply `completion` when it answers the current request.
    ///
    /// Returns whether the state changed. An empty query always fails, even
    /// when the provider reported success.
    pub fn resolve(&mut self, completion: SearchCompletion) -> bool {
        if completion.generation != self.session.generation || !self.session.state.is_fetching() {
            debug!(
                query = %completion.query,
                generation = completion.generation,
                current_generation = self.session.generation,
                "discarding stale search response"
            );
            return false;
        }

        let outcome = if completion.query.is_empty() {
            Err(SearchError::EmptyQuery)
        } else {
            completion.outcome
        };
        self.session.state = match outcome {
            Ok(results) => {
                debug!(query = %completion.query, result_count = results.len(), "search fetched");
                SearchState::Fetched(results)
            }
            Err(error) => {
                debug!(query = %completion.query, error = %error, "search failed");
                SearchState::Failed(error.to_string())
            }
        };
        true
    }
}
