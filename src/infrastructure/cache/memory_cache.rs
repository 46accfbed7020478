//! In-process cache with per-entry expiry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::class::CacheClass;
use super::store::{CacheError, CacheResult, CacheStore};
use crate::domain::entities::CacheEntry;

struct StoredEntry {
    payload: String,
    expires_at: Instant,
}

/// A cache kept in process memory.
///
/// Used when Redis is not configured, and as the store for tests. Entries are kept in
/// their tagged JSON form, exactly as Redis would hold them, and expire lazily: an
/// expired entry reads as a miss and is dropped on the next write.
///
/// Not shared between processes.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<(CacheClass, String), StoredEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using MemoryCache (in-process)");
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, class: CacheClass, key: &str) -> CacheResult<Option<CacheEntry>> {
        let entries = self.entries.read().await;

        match entries.get(&(class, key.to_string())) {
            Some(stored) if stored.expires_at > Instant::now() => {
                Ok(Some(CacheEntry::from_json(&stored.payload)?))
            }
            _ => Ok(None),
        }
    }

    async fn put(
        &self,
        class: CacheClass,
        key: &str,
        value: &CacheEntry,
        ttl: Duration,
    ) -> CacheResult<()> {
        let payload = value.to_json()?;
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).ok_or_else(|| {
            CacheError::OperationError(format!("TTL of {}s is out of range", ttl.as_secs()))
        })?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, stored| stored.expires_at > now);
        entries.insert(
            (class, key.to_string()),
            StoredEntry {
                payload,
                expires_at,
            },
        );

        Ok(())
    }

    async fn evict(&self, class: CacheClass, key: &str) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .remove(&(class, key.to_string()));
        Ok(())
    }

    async fn clear(&self, class: CacheClass) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .retain(|(entry_class, _), _| *entry_class != class);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
