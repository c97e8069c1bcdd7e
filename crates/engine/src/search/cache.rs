use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    items: Vec<String>,
}

/// Per-query cache of successful search results.
///
/// A zero time-to-live disables caching entirely.
#[derive(Debug, Clone)]
pub struct SearchCache {
    entries: HashMap<String, CacheEntry>,
    time_to_live: Duration,
}

impl SearchCache {
    pub fn new(time_to_live: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            time_to_live,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.time_to_live.is_zero()
    }

    /// Cached results for `query` when younger than the time-to-live.
    pub fn lookup_fresh(&self, query: &str) -> Option<Vec<String>> {
        let entry = self.entries.get(query)?;
        (entry.fetched_at.elapsed() < self.time_to_live).then(|| entry.items.clone())
    }

    pub fn store(&mut self, query: impl Into<String>, items: Vec<String>) {
        if !self.is_enabled() {
            return;
        }
        self.entries.insert(
            query.into(),
            CacheEntry {
                fetched_at: Instant::now(),
                items,
            },
        );
        let time_to_live = self.time_to_live;
        self.entries.retain(|_, entry| entry.fetched_at.elapsed() < time_to_live);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
