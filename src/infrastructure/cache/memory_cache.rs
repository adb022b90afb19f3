//! In-process cache backed by a concurrent map.

use super::store::{CacheResult, CacheStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A cached value and its absolute expiry time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process cache with lazy expiry on read and periodic sweeping.
///
/// `get` compares `expires_at` against the current time and deletes expired
/// entries on the spot, so no caller ever observes a stale value between
/// sweeps. [`MemoryCache::sweep`] removes expired entries that are never
/// read again, bounding memory growth. There is no capacity eviction:
/// the store is bounded only by process memory.
///
/// The `*_at` methods take an explicit [`Instant`] so expiry behavior can
/// be tested without wall-clock sleeps.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry with `expires_at <= now`; returns how many.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    /// Reads `key` as of `now`, lazily deleting it when expired.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        {
            let entry = self.entries.get(key)?;
            if now < entry.expires_at {
                return Some(entry.value.clone());
            }
        }
        // The read guard is released above; expired entries are removed so
        // they do not linger until the next sweep.
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    /// Writes `key` as of `now`; always succeeds, replacing any prior entry.
    pub fn set_at(&self, key: &str, value: &str, ttl: Duration, now: Instant) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self.get_at(key, Instant::now()) {
            Some(value) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.set_at(key, value, ttl, Instant::now());
        debug!("Cache SET: {} (TTL: {}s)", key, ttl.as_secs());
        Ok(())
    }

    async fn entry_count(&self) -> Option<usize> {
        Some(self.len())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
