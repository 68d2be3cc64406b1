//! In-process backend on top of moka with per-entry TTL

use crate::backend::KvBackend;
use crate::error::Result;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct StoredValue {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Each entry lives for the TTL it was written with; a rewrite restarts it.
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory backend, useful for single-instance deployments and tests
pub struct MemoryBackend {
    cache: Cache<String, StoredValue>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await.map(|v| v.bytes.to_vec()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        debug!(key, size = value.len(), ttl_secs, "Storing entry in memory backend");
        let stored = StoredValue {
            bytes: Arc::from(value),
            ttl: Duration::from_secs(ttl_secs),
        };
        self.cache.insert(key.to_string(), stored).await;
        Ok(())
    }

    fn entry_count(&self) -> Option<u64> {
        Some(self.cache.entry_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new();
        backend.set("k", b"value".to_vec(), 60).await.unwrap();

        let value = backend.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"value"[..]));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let backend = MemoryBackend::new();
        assert!(backend.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewrite_replaces_value() {
        let backend = MemoryBackend::new();
        backend.set("k", b"old".to_vec(), 60).await.unwrap();
        backend.set("k", b"new".to_vec(), 60).await.unwrap();

        let value = backend.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"new"[..]));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let backend = MemoryBackend::new();
        backend.set("short", b"v".to_vec(), 1).await.unwrap();
        backend.set("long", b"v".to_vec(), 3600).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(backend.get("short").await.unwrap().is_none());
        assert!(backend.get("long").await.unwrap().is_some());
    }
}
