//! In-process score cache.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::sync::Cache;

use crate::scoring::ScoreRecord;

use super::ScoreCache;

/// A cached record plus its expiry deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    record: ScoreRecord,
    expires_at: Instant,
}

/// In-memory [`ScoreCache`] for tests and single-instance deployments.
///
/// Entries expire lazily on read; moka's LRU bounds the total entry count.
pub struct InMemoryScoreCache {
    entries: Cache<String, CacheEntry>,
}

impl InMemoryScoreCache {
    const DEFAULT_CAPACITY: u64 = 10_000;

    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }
}

impl Default for InMemoryScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryScoreCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryScoreCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl ScoreCache for InMemoryScoreCache {
    async fn read(&self, key: &str) -> Option<ScoreRecord> {
        let entry = self.entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            self.entries.invalidate(key);
            return None;
        }
        Some(entry.record)
    }

    async fn write(&self, key: &str, record: ScoreRecord, ttl: Duration) {
        let entry = CacheEntry {
            record,
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) {
        self.entries.invalidate(key);
    }
}
