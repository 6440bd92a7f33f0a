//! Bounded LRU cache of retrieved context.

use indexmap::IndexMap;

/// Default number of cached queries.
pub const DEFAULT_CAPACITY: usize = 64;

/// Cache key for `query`: whitespace collapsed, trimmed, lowercased.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Least-recently-used cache from normalized query to context.
///
/// Entries are kept in recency order, oldest first. A capacity of zero
/// disables caching entirely.
#[derive(Debug, Clone)]
pub struct QueryCache {
    capacity: usize,
    entries: IndexMap<String, String>,
    hits: u64,
    misses: u64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl QueryCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            hits: 0,
            misses: 0,
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached context for `query`, marking it most recently used.
    pub fn get(&mut self, query: &str) -> Option<String> {
        let key = normalize_query(query);
        match self.entries.shift_remove(&key) {
            Some(context) => {
                self.hits += 1;
                self.entries.insert(key, context.clone());
                Some(context)
            },
            None => {
                self.misses += 1;
                None
            },
        }
    }

    /// Cache `context` for `query`, evicting the least recently used entry
    /// when full.
    pub fn insert(&mut self, query: &str, context: String) {
        if self.capacity == 0 {
            return;
        }
        let key = normalize_query(query);
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                log::debug!("Query cache evicted {:?}", evicted);
            }
        }
        self.entries.insert(key, context);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Query cache cleared ({} entries)", self.entries.len());
        }
        self.entries.clear();
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
