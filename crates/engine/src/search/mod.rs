//! Entity search: provider contract, built-in providers and the request
//! lifecycle that keeps only the newest response.

mod cache;
mod directory;
mod execute;
mod null;
mod workflow;

use std::fmt::Debug;

use async_trait::async_trait;
use mentions_types::SearchError;

pub use cache::SearchCache;
pub use directory::StaticDirectoryProvider;
pub use execute::execute_search;
pub use null::NullSearchProvider;
pub use workflow::{SearchCompletion, SearchRequest, SearchWorkflow};

/// Source of candidate entities for a mention query.
///
/// The query arrives without the leading `@`. Implementations may complete
/// in any order relative to other calls; the workflow discards responses to
/// superseded queries.
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    /// Candidates matching `query`, in the order they should be offered.
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError>;
}
