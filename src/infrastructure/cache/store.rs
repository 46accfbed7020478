//! Cache store trait and error types.

use async_trait::async_trait;
use std::time::Duration;

use super::class::CacheClass;
use crate::domain::entities::CacheEntry;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-entry TTL, namespaced by [`CacheClass`].
///
/// Values are [`CacheEntry`] envelopes; implementations encode them with their type tag
/// and decode them back without caller-supplied type hints. Absent entries are `Ok(None)`:
/// nothing is ever stored for "no value".
///
/// Unlike a fail-open cache, implementations report backend failures as errors. Callers
/// decide whether a failure degrades to a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with `SET EX`
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map with expiry instants
/// - [`crate::infrastructure::cache::ObservableCache`] - Recording decorator over either
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the entry stored under `key` in `class`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` on hit
    /// - `Ok(None)` on miss or expired entry
    async fn get(&self, class: CacheClass, key: &str) -> CacheResult<Option<CacheEntry>>;

    /// Stores `value` under `key` in `class`, expiring after `ttl`.
    ///
    /// Last writer wins.
    async fn put(
        &self,
        class: CacheClass,
        key: &str,
        value: &CacheEntry,
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Removes a single entry. Removing an absent entry is not an error.
    async fn evict(&self, class: CacheClass, key: &str) -> CacheResult<()>;

    /// Removes every entry of a class.
    async fn clear(&self, class: CacheClass) -> CacheResult<()>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
