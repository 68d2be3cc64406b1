//! Cache-aside store
//!
//! Serves structured values from a key-value backend when a fresh entry
//! exists, otherwise runs the caller's producer and writes its result back
//! under a TTL. Backend failures never surface to the caller: a failed read
//! is a miss and a failed write is skipped. Without a backend every call goes
//! straight to the producer.

pub mod backend;
pub mod codec;
pub mod error;
pub mod key;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_backend;
pub mod store;
pub mod types;

pub use backend::KvBackend;
pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use memory::MemoryBackend;
#[cfg(feature = "redis")]
pub use redis_backend::RedisBackend;
pub use store::{fetch, fetch_with_status, CacheAside};
pub use types::{CacheStats, CacheStatus};
