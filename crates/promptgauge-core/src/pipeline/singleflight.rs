//! Per-key deduplication of in-flight computations.
//!
//! The first caller for a key computes; concurrent callers for the same key
//! wait on the same permit and re-check the cache once it is released. Map
//! entries are removed when the last interested caller drops its permit, so
//! the map only holds keys that are actually in flight.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct FlightGroup {
    flights: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins (or starts) the flight for `key`, resolving once the permit is
    /// exclusively held. Correct under concurrent first-touch: the slot is
    /// created or cloned under the map lock.
    pub async fn acquire(&self, key: &str) -> FlightPermit<'_> {
        let slot = {
            let mut flights = self.flights.lock();
            flights.entry(key.to_string()).or_default().clone()
        };

        let guard = slot.clone().lock_owned().await;

        FlightPermit {
            group: self,
            key: key.to_string(),
            slot,
            _guard: guard,
        }
    }

    /// Number of keys currently in flight.
    pub fn in_flight(&self) -> usize {
        self.flights.lock().len()
    }
}

/// Exclusive permit for one key; releases and cleans up on drop.
pub struct FlightPermit<'a> {
    group: &'a FlightGroup,
    key: String,
    slot: Arc<AsyncMutex<()>>,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        let mut flights = self.group.flights.lock();
        // map + our slot + the guard's own handle account for three strong
        // references; anything above that is a waiter that still needs the
        // entry
        if Arc::strong_count(&self.slot) <= 3 {
            flights.remove(&self.key);
        }
    }
}
