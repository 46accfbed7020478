//! Recording decorator for cache stores.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::class::CacheClass;
use super::store::{CacheResult, CacheStore};
use crate::domain::entities::CacheEntry;

/// Outcome recorded for one cache operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Inserted,
    Evicted,
    Cleared,
    Error,
}

impl CacheOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Inserted => "inserted",
            Self::Evicted => "evicted",
            Self::Cleared => "cleared",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time counters of an [`ObservableCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub clears: u64,
    pub errors: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    clears: AtomicU64,
    errors: AtomicU64,
}

impl Counters {
    fn bump(&self, outcome: CacheOutcome) {
        let counter = match outcome {
            CacheOutcome::Hit => &self.hits,
            CacheOutcome::Miss => &self.misses,
            CacheOutcome::Inserted => &self.inserts,
            CacheOutcome::Evicted => &self.evictions,
            CacheOutcome::Cleared => &self.clears,
            CacheOutcome::Error => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Wraps a [`CacheStore`] and records every operation.
///
/// For each call the decorator logs operation, class, key, outcome and elapsed time,
/// emits `weather_cache_operations_total` / `weather_cache_operation_duration_seconds`
/// through the `metrics` facade, and bumps in-process counters readable via
/// [`Self::stats`].
///
/// Results from the wrapped store are returned unchanged, errors included.
pub struct ObservableCache {
    inner: Arc<dyn CacheStore>,
    counters: Counters,
}

impl ObservableCache {
    pub fn new(inner: Arc<dyn CacheStore>) -> Self {
        Self {
            inner,
            counters: Counters::default(),
        }
    }

    /// Current operation counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    fn record(
        &self,
        operation: &'static str,
        class: CacheClass,
        key: Option<&str>,
        outcome: CacheOutcome,
        elapsed: Duration,
    ) {
        self.counters.bump(outcome);

        metrics::counter!(
            "weather_cache_operations_total",
            "operation" => operation,
            "class" => class.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "weather_cache_operation_duration_seconds",
            "operation" => operation,
            "class" => class.as_str()
        )
        .record(elapsed.as_secs_f64());

        let key = key.unwrap_or("*");
        let elapsed_ms = elapsed.as_millis() as u64;
        if outcome == CacheOutcome::Error {
            warn!(class = %class, key, outcome = %outcome, elapsed_ms, "cache.{}", operation);
        } else {
            debug!(class = %class, key, outcome = %outcome, elapsed_ms, "cache.{}", operation);
        }
    }
}

#[async_trait]
impl CacheStore for ObservableCache {
    async fn get(&self, class: CacheClass, key: &str) -> CacheResult<Option<CacheEntry>> {
        let start = Instant::now();
        let result = self.inner.get(class, key).await;

        let outcome = match &result {
            Ok(Some(_)) => CacheOutcome::Hit,
            Ok(None) => CacheOutcome::Miss,
            Err(_) => CacheOutcome::Error,
        };
        self.record("get", class, Some(key), outcome, start.elapsed());

        result
    }

    async fn put(
        &self,
        class: CacheClass,
        key: &str,
        value: &CacheEntry,
        ttl: Duration,
    ) -> CacheResult<()> {
        let start = Instant::now();
        let result = self.inner.put(class, key, value, ttl).await;

        let outcome = match &result {
            Ok(()) => CacheOutcome::Inserted,
            Err(_) => CacheOutcome::Error,
        };
        self.record("put", class, Some(key), outcome, start.elapsed());

        result
    }

    async fn evict(&self, class: CacheClass, key: &str) -> CacheResult<()> {
        let start = Instant::now();
        let result = self.inner.evict(class, key).await;

        let outcome = match &result {
            Ok(()) => CacheOutcome::Evicted,
            Err(_) => CacheOutcome::Error,
        };
        self.record("evict", class, Some(key), outcome, start.elapsed());

        result
    }

    async fn clear(&self, class: CacheClass) -> CacheResult<()> {
        let start = Instant::now();
        let result = self.inner.clear(class).await;

        let outcome = match &result {
            Ok(()) => CacheOutcome::Cleared,
            Err(_) => CacheOutcome::Error,
        };
        self.record("clear", class, None, outcome, start.elapsed());

        result
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}
