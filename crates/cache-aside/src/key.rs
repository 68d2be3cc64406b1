//! Cache key construction

use std::fmt;

/// Separator between key segments
pub const KEY_DELIMITER: char = ':';

/// A cache key of the form `namespace:operation:param1:param2...`.
///
/// Parameters are appended in call order, so each operation must always push
/// them in the same order to keep keys byte-identical across requests. Each
/// parameter is percent-encoded, so a delimiter inside a value can never shift
/// segment boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(namespace: &str, operation: &str) -> Self {
        Self(format!("{}{}{}", namespace, KEY_DELIMITER, operation))
    }

    /// Append a parameter segment
    pub fn param(mut self, value: impl fmt::Display) -> Self {
        self.0.push(KEY_DELIMITER);
        self.0.push_str(&urlencoding::encode(&value.to_string()));
        self
    }

    /// Append an optional parameter; absent values render as an empty segment
    /// so the segment count stays fixed for the operation.
    pub fn opt_param<V: fmt::Display>(self, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(v),
            None => self.param(""),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = CacheKey::new("demo", "search").param("batman").param(1);
        assert_eq!(key.as_str(), "demo:search:batman:1");
    }

    #[test]
    fn test_key_without_params() {
        let key = CacheKey::new("flixhq", "recent-shows");
        assert_eq!(key.to_string(), "flixhq:recent-shows");
    }

    #[test]
    fn test_identical_requests_identical_keys() {
        let a = CacheKey::new("flixhq", "watch").param("ep-1").param("tv/x-1").param("upcloud");
        let b = CacheKey::new("flixhq", "watch").param("ep-1").param("tv/x-1").param("upcloud");
        assert_eq!(a, b);
        assert_eq!(a.as_str().as_bytes(), b.as_str().as_bytes());
    }

    #[test]
    fn test_param_order_is_significant() {
        let a = CacheKey::new("p", "servers").param("a").param("b");
        let b = CacheKey::new("p", "servers").param("b").param("a");
        assert_ne!(a, b);
    }

    #[test]
    fn test_delimiter_inside_param_does_not_collide() {
        let a = CacheKey::new("p", "watch").param("1:2").param("3");
        let b = CacheKey::new("p", "watch").param("1").param("2:3");
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "p:watch:1%3A2:3");
        assert_eq!(b.as_str(), "p:watch:1:2%3A3");
    }

    #[test]
    fn test_encoded_looking_param_stays_distinct() {
        let raw = CacheKey::new("p", "search").param("a:b");
        let pre_encoded = CacheKey::new("p", "search").param("a%3Ab");
        assert_ne!(raw, pre_encoded);
    }

    #[test]
    fn test_optional_param_keeps_segment() {
        let key = CacheKey::new("p", "watch").param("ep").param("media").opt_param(None::<&str>);
        assert_eq!(key.as_str(), "p:watch:ep:media:");
    }
}
