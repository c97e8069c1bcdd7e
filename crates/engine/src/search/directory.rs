//! In-memory entity directory.

use async_trait::async_trait;
use mentions_types::SearchError;
use tracing::debug;

use super::SearchProvider;

/// Provider backed by a fixed list of entities, matched by substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDirectoryProvider {
    entries: Vec<String>,
    case_insensitive: bool,
    limit: Option<usize>,
}

impl StaticDirectoryProvider {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            case_insensitive: false,
            limit: None,
        }
    }

    /// Small directory of example addresses for demos and tests.
    pub fn sample() -> Self {
        Self::new(["user1@example.com", "user2@example.com", "test@example.com", "sample@example.com"])
    }

    /// Match ignoring case.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Return at most `limit` candidates.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Synchronous lookup shared by the async provider implementation.
    pub fn lookup(&self, query: &str) -> Result<Vec<String>, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let needle = self.normalize(query);
        let matches = self
            .entries
            .iter()
            .filter(|entry| self.normalize(entry).contains(needle.as_str()))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect::<Vec<_>>();
        debug!(query, match_count = matches.len(), "directory lookup");
        Ok(matches)
    }

    fn normalize(&self, value: &str) -> String {
        if self.case_insensitive {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }
}

#[async_trait]
impl SearchProvider for StaticDirectoryProvider {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.lookup(query)
    }
}
