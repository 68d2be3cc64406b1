//! Error types for the cache-aside store

use thiserror::Error;

/// Failures raised by backends and the codec.
///
/// These never escape [`crate::fetch`]; they are logged and treated as a miss
/// (reads) or a skipped write.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, CacheError>;
