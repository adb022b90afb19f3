//! Cache store trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching serialized provider responses.
///
/// Values are opaque JSON strings; the store never interprets them. Every
/// entry carries a finite TTL fixed at write time, and the store holds at
/// most one entry per key (last successful write wins).
///
/// Implementations must be fail-open: a broken cache degrades the service to
/// direct provider calls, it never fails a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process map with lazy
///   and periodic expiry
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store with
///   server-enforced expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the serialized value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Backend I/O failures may surface as [`CacheError`]; callers treat
    /// them identically to a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// # Errors
    ///
    /// Production implementations log backend failures and return `Ok(())`
    /// so a failed write-through never fails the request that produced it.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Number of live entries, when the backend can report it cheaply.
    ///
    /// Used by the health endpoint; `None` for backends where counting
    /// would be a remote scan.
    async fn entry_count(&self) -> Option<usize>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend identifier for health reporting (`"memory"`, `"redis"`).
    fn backend_name(&self) -> &'static str;
}
