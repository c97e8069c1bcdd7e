use std::time::Duration;

use mentions_types::SearchError;
use tracing::{debug, warn};

use super::{SearchCompletion, SearchProvider, SearchRequest};

/// Run `request` against `provider`, bounded by `timeout` when given.
///
/// An empty query short-circuits to [`SearchError::EmptyQuery`] without
/// calling the provider.
pub async fn execute_search(provider: &dyn SearchProvider, request: &SearchRequest, timeout: Option<Duration>) -> SearchCompletion {
    if request.query.is_empty() {
        return request.complete(Err(SearchError::EmptyQuery));
    }

    debug!(query = %request.query, generation = request.generation, "provider search started");
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, provider.search(&request.query)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                warn!(query = %request.query, timeout_ms, "provider search timed out");
                Err(SearchError::timeout(request.query.clone(), timeout_ms))
            }
        },
        None => provider.search(&request.query).await,
    };
    request.complete(outcome)
}
