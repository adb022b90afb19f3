//! Periodic expiry sweep for the in-process cache.

use super::memory_cache::MemoryCache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Background task that removes expired entries on a fixed interval.
///
/// Lazy expiry on read already guarantees callers never observe stale
/// values; the sweep only bounds memory growth from entries that are never
/// read again after expiring. The task is owned explicitly and stopped via
/// [`CacheSweeper::stop`] on shutdown (or on drop).
pub struct CacheSweeper {
    handle: JoinHandle<()>,
}

impl CacheSweeper {
    /// Spawns a sweep task over `cache` ticking every `interval`.
    pub fn spawn(cache: Arc<MemoryCache>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; an empty cache has
            // nothing to sweep yet.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = cache.sweep(Instant::now());
                if removed > 0 {
                    debug!("Cache sweep removed {} expired entries", removed);
                }
            }
        });

        Self { handle }
    }

    /// Stops the sweep task.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for CacheSweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
