use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::GatewayError;

/// Which key-value store backs the response cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    None,
    Memory,
    Redis,
}

impl FromStr for CacheBackendKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(CacheBackendKind::None),
            "memory" => Ok(CacheBackendKind::Memory),
            "redis" => Ok(CacheBackendKind::Redis),
            other => Err(GatewayError::Config(format!(
                "Unknown CACHE_BACKEND '{}' (expected none, memory or redis)",
                other
            ))),
        }
    }
}

/// Gateway configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub cache_backend: CacheBackendKind,
    pub redis_url: Option<String>,
    pub memory_cache_capacity: u64,
    pub image_fetch_timeout: Duration,
    /// `None` fetches every image of a batch at once
    pub image_fetch_concurrency: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream_url: "http://localhost:3100".to_string(),
            upstream_timeout: Duration::from_secs(30),
            cache_backend: CacheBackendKind::None,
            redis_url: None,
            memory_cache_capacity: 10_000,
            image_fetch_timeout: Duration::from_secs(10),
            image_fetch_concurrency: None,
        }
    }
}

impl Config {
    /// Parse configuration from the process environment
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<L>(lookup: L) -> Result<Self, GatewayError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let upstream_url = lookup("UPSTREAM_URL").unwrap_or(defaults.upstream_url);

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.upstream_timeout);

        let redis_url = lookup("REDIS_URL").filter(|url| !url.is_empty());

        // Redis is implied by a connection string unless a backend is named
        let cache_backend = match lookup("CACHE_BACKEND") {
            Some(kind) => kind.parse()?,
            None if redis_url.is_some() => CacheBackendKind::Redis,
            None => CacheBackendKind::None,
        };

        if cache_backend == CacheBackendKind::Redis && redis_url.is_none() {
            return Err(GatewayError::Config(
                "CACHE_BACKEND=redis requires REDIS_URL".to_string(),
            ));
        }

        let memory_cache_capacity = lookup("MEMORY_CACHE_CAPACITY")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.memory_cache_capacity);

        let image_fetch_timeout = lookup("IMAGE_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.image_fetch_timeout);

        let image_fetch_concurrency = lookup("IMAGE_FETCH_CONCURRENCY")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0);

        Ok(Self {
            port,
            upstream_url,
            upstream_timeout,
            cache_backend,
            redis_url,
            memory_cache_capacity,
            image_fetch_timeout,
            image_fetch_concurrency,
        })
    }
}
