//! Cache layer for weather payloads.
//!
//! Provides a [`CacheStore`] trait with two backends and one decorator:
//! - [`RedisCache`] - Production Redis-backed store with per-entry expiry
//! - [`MemoryCache`] - In-process store used when Redis is not configured and in tests
//! - [`ObservableCache`] - Transparent wrapper that records outcome and latency of every call
//!
//! Entries are namespaced by [`CacheClass`]; each class has its own TTL ([`CacheTtls`]).

mod class;
mod memory_cache;
mod observable;
mod redis_cache;
mod store;

pub use class::{CacheClass, CacheTtls};
pub use memory_cache::MemoryCache;
pub use observable::{CacheOutcome, CacheStats, ObservableCache};
pub use redis_cache::RedisCache;
pub use store::{CacheError, CacheResult, CacheStore};

#[cfg(test)]
pub use store::MockCacheStore;
