//! Redis-backed cache implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

use super::class::CacheClass;
use super::store::{CacheError, CacheResult, CacheStore};
use crate::domain::entities::CacheEntry;

/// Keys deleted per `SCAN` page when clearing a class.
const SCAN_COUNT: usize = 200;

/// Redis cache for weather payloads.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Keys are namespaced as `{class}::{key}`, e.g. `weathers-forecast::hanoi:2024-01-01:2024-01-02`.
/// Values are tagged JSON ([`CacheEntry`]); expiry is delegated to Redis via `SET EX`.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    /// Constructs the full Redis key with class namespace.
    fn build_key(class: CacheClass, key: &str) -> String {
        format!("{}::{}", class.as_str(), key)
    }

    fn class_pattern(class: CacheClass) -> String {
        format!("{}::*", class.as_str())
    }
}

fn op_error(op: &str, key: &str, e: redis::RedisError) -> CacheError {
    CacheError::OperationError(format!("Redis {} failed for {}: {}", op, key, e))
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, class: CacheClass, key: &str) -> CacheResult<Option<CacheEntry>> {
        let full_key = Self::build_key(class, key);
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| op_error("GET", &full_key, e))?;

        match raw {
            Some(raw) => Ok(Some(CacheEntry::from_json(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        class: CacheClass,
        key: &str,
        value: &CacheEntry,
        ttl: Duration,
    ) -> CacheResult<()> {
        let full_key = Self::build_key(class, key);
        let payload = value.to_json()?;
        let mut conn = self.client.clone();
        // SET EX rejects zero.
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&full_key, payload, ttl_seconds)
            .await
            .map_err(|e| op_error("SET", &full_key, e))?;

        debug!("Redis SET {} (TTL: {}s)", full_key, ttl_seconds);
        Ok(())
    }

    async fn evict(&self, class: CacheClass, key: &str) -> CacheResult<()> {
        let full_key = Self::build_key(class, key);
        let mut conn = self.client.clone();

        conn.del::<_, i64>(&full_key)
            .await
            .map_err(|e| op_error("DEL", &full_key, e))?;

        Ok(())
    }

    async fn clear(&self, class: CacheClass) -> CacheResult<()> {
        let pattern = Self::class_pattern(class);
        let mut conn = self.client.clone();
        let mut cursor: u64 = 0;
        let mut removed: usize = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(|e| op_error("SCAN", &pattern, e))?;

            if !keys.is_empty() {
                removed += keys.len();
                conn.del::<_, i64>(&keys)
                    .await
                    .map_err(|e| op_error("DEL", &pattern, e))?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Redis cleared {} keys matching {}", removed, pattern);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
