//! Key-value backend contract

use crate::error::Result;
use async_trait::async_trait;

/// A shared byte store with per-entry expiry.
///
/// Implementations must be safe to share across concurrent requests. Writes to
/// the same key replace the previous entry and restart its TTL.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read a stored value, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value that expires after `ttl_secs`
    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()>;

    /// Number of live entries, if the backend can report it cheaply
    fn entry_count(&self) -> Option<u64> {
        None
    }
}
