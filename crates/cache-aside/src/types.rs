//! Cache types

use serde::{Deserialize, Serialize};

/// How a value was obtained by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    /// Served from the backend; the producer was not invoked
    Hit,
    /// Produced fresh and written back
    Miss,
    /// No backend configured; produced without caching
    Bypass,
}

impl CacheStatus {
    /// Value for the `X-Cache` response header
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Bypass => "BYPASS",
        }
    }
}

/// Statistics about the cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_default() {
        let stats = CacheStats::default();
        assert!(!stats.enabled);
        assert_eq!(stats.entries, None);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_cache_stats_serialization_skips_unknown_entries() {
        let stats = CacheStats {
            enabled: true,
            entries: None,
            hits: 3,
            misses: 1,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("entries"));
        assert!(json.contains("\"hits\":3"));
    }

    #[test]
    fn test_status_header_values() {
        assert_eq!(CacheStatus::Hit.as_header_value(), "HIT");
        assert_eq!(CacheStatus::Miss.as_header_value(), "MISS");
        assert_eq!(CacheStatus::Bypass.as_header_value(), "BYPASS");
    }
}
