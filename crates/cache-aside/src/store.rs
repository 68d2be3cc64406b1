//! Read-through fetch over an optional backend

use crate::backend::KvBackend;
use crate::codec;
use crate::key::CacheKey;
use crate::types::{CacheStats, CacheStatus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Return the cached value for `key`, or run `producer` and cache its result.
///
/// With no backend the producer runs on every call. Producer errors are
/// returned unchanged and nothing is written.
pub async fn fetch<T, E, F, Fut>(
    backend: Option<&dyn KvBackend>,
    key: &CacheKey,
    producer: F,
    ttl_secs: u64,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    fetch_with_status(backend, key, producer, ttl_secs)
        .await
        .map(|(value, _)| value)
}

/// Same as [`fetch`], also reporting whether the value came from the backend
pub async fn fetch_with_status<T, E, F, Fut>(
    backend: Option<&dyn KvBackend>,
    key: &CacheKey,
    producer: F,
    ttl_secs: u64,
) -> Result<(T, CacheStatus), E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let Some(backend) = backend else {
        return producer().await.map(|value| (value, CacheStatus::Bypass));
    };

    match backend.get(key.as_str()).await {
        Ok(Some(bytes)) => match codec::decode::<T>(&bytes) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                return Ok((value, CacheStatus::Hit));
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cached value failed to decode, recomputing");
            }
        },
        Ok(None) => debug!(key = %key, "Cache miss"),
        Err(e) => warn!(key = %key, error = %e, "Cache read failed, treating as miss"),
    }

    let value = producer().await?;
    write_back(backend, key, &value, ttl_secs).await;

    Ok((value, CacheStatus::Miss))
}

async fn write_back<T: Serialize>(
    backend: &dyn KvBackend,
    key: &CacheKey,
    value: &T,
    ttl_secs: u64,
) {
    if ttl_secs == 0 {
        debug!(key = %key, "Zero TTL, not caching");
        return;
    }

    let bytes = match codec::encode(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to encode value for cache");
            return;
        }
    };

    // Continue even if caching fails
    if let Err(e) = backend.set(key.as_str(), bytes, ttl_secs).await {
        warn!(key = %key, error = %e, "Failed to cache value");
    }
}

/// Cache-aside store bound to an optional shared backend, with hit/miss counters
pub struct CacheAside {
    backend: Option<Arc<dyn KvBackend>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheAside {
    pub fn new(backend: Option<Arc<dyn KvBackend>>) -> Self {
        Self {
            backend,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A store that always calls through to the producer
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&dyn KvBackend> {
        self.backend.as_deref()
    }

    pub async fn fetch<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        ttl_secs: u64,
        producer: F,
    ) -> Result<(T, CacheStatus), E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let (value, status) = fetch_with_status(self.backend(), key, producer, ttl_secs).await?;

        match status {
            CacheStatus::Hit => {
                self.hits.fetch_add(1, Ordering::Relaxed);
            }
            CacheStatus::Miss => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
            CacheStatus::Bypass => {}
        }

        Ok((value, status))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.is_enabled(),
            entries: self.backend.as_ref().and_then(|b| b.entry_count()),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CacheError, Result as CacheResult};
    use crate::memory::MemoryBackend;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Backend with a manually advanced clock so expiry is deterministic
    #[derive(Default)]
    struct ClockedBackend {
        now: AtomicU64,
        entries: Mutex<HashMap<String, (Vec<u8>, u64)>>,
        writes: AtomicUsize,
    }

    impl ClockedBackend {
        fn advance(&self, secs: u64) {
            self.now.fetch_add(secs, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KvBackend for ClockedBackend {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            let now = self.now.load(Ordering::SeqCst);
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .get(key)
                .filter(|(_, expires_at)| now < *expires_at)
                .map(|(bytes, _)| bytes.clone()))
        }

        async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> CacheResult<()> {
            let expires_at = self.now.load(Ordering::SeqCst) + ttl_secs;
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value, expires_at));
            Ok(())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl KvBackend for FailingBackend {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::Backend("read refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl_secs: u64) -> CacheResult<()> {
            Err(CacheError::Backend("write refused".to_string()))
        }
    }

    async fn produce(calls: Arc<AtomicUsize>, value: u32) -> std::result::Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn fail(calls: Arc<AtomicUsize>) -> std::result::Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err("upstream down".to_string())
    }

    fn key() -> CacheKey {
        CacheKey::new("demo", "search").param("batman").param(1)
    }

    #[tokio::test]
    async fn test_hit_avoids_recompute() {
        let backend = ClockedBackend::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = fetch(Some(&backend), &key(), || produce(calls.clone(), 7), 60).await;
        backend.advance(30);
        let second = fetch(Some(&backend), &key(), || produce(calls.clone(), 8), 60).await;

        assert_eq!(first, Ok(7));
        assert_eq!(second, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_miss_after_expiry() {
        let backend = ClockedBackend::default();
        let calls = Arc::new(AtomicUsize::new(0));

        fetch(Some(&backend), &key(), || produce(calls.clone(), 1), 60)
            .await
            .unwrap();
        backend.advance(60);
        let refreshed = fetch(Some(&backend), &key(), || produce(calls.clone(), 2), 60)
            .await
            .unwrap();

        assert_eq!(refreshed, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(backend.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_backend_always_produces() {
        let calls = Arc::new(AtomicUsize::new(0));

        for i in 0..5 {
            let (value, status) = fetch_with_status(None, &key(), || produce(calls.clone(), i), 60)
                .await
                .unwrap();
            assert_eq!(value, i);
            assert_eq!(status, CacheStatus::Bypass);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_backend_failures_are_transparent() {
        let calls = Arc::new(AtomicUsize::new(0));

        let (value, status) =
            fetch_with_status(Some(&FailingBackend), &key(), || produce(calls.clone(), 9), 60)
                .await
                .unwrap();

        assert_eq!(value, 9);
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_producer_failure_propagates_and_writes_nothing() {
        let backend = ClockedBackend::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let result = fetch(Some(&backend), &key(), || fail(calls.clone()), 60).await;

        assert_eq!(result, Err("upstream down".to_string()));
        assert_eq!(backend.writes.load(Ordering::SeqCst), 0);

        // The next call still reaches the producer
        let retry = fetch(Some(&backend), &key(), || produce(calls.clone(), 3), 60).await;
        assert_eq!(retry, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_recomputed() {
        let backend = ClockedBackend::default();
        backend
            .set(key().as_str(), b"{not json".to_vec(), 60)
            .await
            .unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let value = fetch(Some(&backend), &key(), || produce(calls.clone(), 5), 60)
            .await
            .unwrap();

        assert_eq!(value, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Overwritten with a decodable entry
        let again = fetch(Some(&backend), &key(), || produce(calls.clone(), 6), 60)
            .await
            .unwrap();
        assert_eq!(again, 5);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_not_stored() {
        let backend = ClockedBackend::default();
        let calls = Arc::new(AtomicUsize::new(0));

        fetch(Some(&backend), &key(), || produce(calls.clone(), 1), 0)
            .await
            .unwrap();

        assert_eq!(backend.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_scenario_served_from_storage() {
        let backend = MemoryBackend::new();
        let key = CacheKey::new("demo", "search").param("batman").param(1);
        let stored = json!({
            "results": [{ "id": 1, "title": "Batman", "image": "http://x/250x400/a.jpg" }]
        });

        let first: serde_json::Value = fetch(
            Some(&backend),
            &key,
            || async { Ok::<_, String>(stored.clone()) },
            21600,
        )
        .await
        .unwrap();

        let second: serde_json::Value = fetch(
            Some(&backend),
            &key,
            || async { Err::<serde_json::Value, _>("producer must not run".to_string()) },
            21600,
        )
        .await
        .unwrap();

        assert_eq!(first, stored);
        assert_eq!(second, stored);
    }

    #[tokio::test]
    async fn test_cache_aside_counts_hits_and_misses() {
        let cache = CacheAside::new(Some(Arc::new(MemoryBackend::new())));
        let calls = Arc::new(AtomicUsize::new(0));

        let (_, first) = cache
            .fetch(&key(), 60, || produce(calls.clone(), 1))
            .await
            .unwrap();
        let (_, second) = cache
            .fetch(&key(), 60, || produce(calls.clone(), 1))
            .await
            .unwrap();

        assert_eq!(first, CacheStatus::Miss);
        assert_eq!(second, CacheStatus::Hit);

        let stats = cache.stats();
        assert!(stats.enabled);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_aside_bypasses() {
        let cache = CacheAside::disabled();
        let calls = Arc::new(AtomicUsize::new(0));

        let (_, status) = cache
            .fetch(&key(), 60, || produce(calls.clone(), 1))
            .await
            .unwrap();

        assert_eq!(status, CacheStatus::Bypass);
        let stats = cache.stats();
        assert!(!stats.enabled);
        assert_eq!(stats.hits + stats.misses, 0);
    }
}
