use std::future::Future;
use std::sync::Arc;

use cache_aside::{CacheAside, CacheKey, CacheStatus};
use chrono::{DateTime, Utc};
use image_inline::ImageInliner;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::providers::{ProviderRegistry, RegisteredProvider};

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderRegistry>,
    pub cache: Arc<CacheAside>,
    pub inliner: Arc<ImageInliner>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(providers: ProviderRegistry, cache: CacheAside, inliner: ImageInliner) -> Self {
        Self {
            providers: Arc::new(providers),
            cache: Arc::new(cache),
            inliner: Arc::new(inliner),
            started_at: Utc::now(),
        }
    }

    /// Run `producer` through the response cache when the provider is cached
    pub async fn cached<T, E, F, Fut>(
        &self,
        provider: &RegisteredProvider,
        key: &CacheKey,
        ttl_secs: u64,
        producer: F,
    ) -> Result<(T, CacheStatus), E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if provider.profile.cached {
            self.cache.fetch(key, ttl_secs, producer).await
        } else {
            cache_aside::fetch_with_status(None, key, producer, ttl_secs).await
        }
    }
}
