//! Movies gateway
//!
//! Serves movie provider routes under /movies/{provider}, caching upstream
//! responses in Redis or memory and inlining poster images as data URIs.

mod config;
mod constants;
mod enrichment;
mod error;
mod providers;
mod routes;
mod server;
mod state;

use std::sync::Arc;

use cache_aside::{CacheAside, MemoryBackend, RedisBackend};
use image_inline::{HttpImageFetcher, ImageInliner};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::{CacheBackendKind, Config};
use crate::error::Result;
use crate::providers::ProviderRegistry;
use crate::server::start_server;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("movies_gateway=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting movies gateway...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("Upstream: {}", config.upstream_url);
    info!("Cache backend: {:?}", config.cache_backend);

    let cache = build_cache(&config).await;

    let fetcher = HttpImageFetcher::with_timeout(config.image_fetch_timeout);
    let mut inliner = ImageInliner::new(Arc::new(fetcher));
    if let Some(limit) = config.image_fetch_concurrency {
        info!("Image fetch concurrency: {}", limit);
        inliner = inliner.with_max_concurrency(limit);
    }

    let providers = ProviderRegistry::upstream(&config.upstream_url, config.upstream_timeout);
    info!("Providers: {}", providers.names().join(", "));

    let state = AppState::new(providers, cache, inliner);

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}

/// Connect the configured backend. A Redis outage at start-up degrades to no caching.
async fn build_cache(config: &Config) -> CacheAside {
    match config.cache_backend {
        CacheBackendKind::None => {
            info!("Response cache disabled");
            CacheAside::disabled()
        }
        CacheBackendKind::Memory => {
            info!("In-memory cache capacity: {}", config.memory_cache_capacity);
            let backend = MemoryBackend::with_capacity(config.memory_cache_capacity);
            CacheAside::new(Some(Arc::new(backend)))
        }
        CacheBackendKind::Redis => {
            let url = config.redis_url.as_deref().unwrap_or_default();
            match RedisBackend::connect(url).await {
                Ok(backend) => CacheAside::new(Some(Arc::new(backend))),
                Err(e) => {
                    warn!(error = %e, "Failed to connect to Redis, serving without cache");
                    CacheAside::disabled()
                }
            }
        }
    }
}
