use async_trait::async_trait;
use mentions_types::SearchError;

use super::SearchProvider;

/// Provider that never finds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSearchProvider;

#[async_trait]
impl SearchProvider for NullSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<String>, SearchError> {
        Ok(Vec::new())
    }
}
