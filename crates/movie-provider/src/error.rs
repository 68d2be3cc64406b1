//! Error types for provider adapters

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid upstream response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ProviderError::Status(503);
        assert_eq!(format!("{}", err), "Upstream returned status 503");
    }

    #[test]
    fn test_not_found_display() {
        let err = ProviderError::NotFound("/movies/flixhq/info".to_string());
        assert_eq!(format!("{}", err), "Not found: /movies/flixhq/info");
    }
}
