//! Timestamped, atomically replaced cache for [`ParkInfo`].

use parkguide_core::ParkInfo;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// A cached value and when it was produced.
#[derive(Debug, Clone)]
pub struct CachedInfo {
    pub info: ParkInfo,
    pub fetched_at: Instant,
}

impl CachedInfo {
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// Holds the most recent [`CachedInfo`].
///
/// Entries are never mutated; [`InfoCache::replace`] swaps the whole `Arc`.
/// Readers holding an older `Arc` keep a consistent value.
pub struct InfoCache {
    slot: RwLock<Option<Arc<CachedInfo>>>,
    freshness: Duration,
}

impl InfoCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            freshness,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// The current entry regardless of age.
    pub fn current(&self) -> Option<Arc<CachedInfo>> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The current entry if it is younger than the freshness window.
    pub fn fresh(&self) -> Option<Arc<CachedInfo>> {
        self.current().filter(|c| c.age() < self.freshness)
    }

    /// Store `info`, timestamped now.
    pub fn replace(&self, info: ParkInfo) -> Arc<CachedInfo> {
        let entry = Arc::new(CachedInfo {
            info,
            fetched_at: Instant::now(),
        });
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(entry.clone());
        entry
    }
}
