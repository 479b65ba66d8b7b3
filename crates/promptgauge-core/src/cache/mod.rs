//! Score memoization: the cache contract and an in-process implementation.

pub mod memory;


pub use memory::InMemoryScoreCache;

use std::time::Duration;

use async_trait::async_trait;

use crate::scoring::ScoreRecord;

/// Key/value store for score records with per-entry TTL.
///
/// Implementations may be in-process (tests, single-instance deployments) or
/// external (shared deployments). Failures are absorbed: `read` misses,
/// `write`/`delete` no-op. Expired entries read as misses.
#[async_trait]
pub trait ScoreCache: Send + Sync {
    async fn read(&self, key: &str) -> Option<ScoreRecord>;

    async fn write(&self, key: &str, record: ScoreRecord, ttl: Duration);

    async fn delete(&self, key: &str);
}
