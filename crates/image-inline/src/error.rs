//! Error types for image fetching

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image host returned status {0}")]
    Status(u16),

    #[error("Image fetch timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ImageError::Status(404);
        assert_eq!(format!("{}", err), "Image host returned status 404");
    }

    #[test]
    fn test_timeout_error_display() {
        let err = ImageError::Timeout(Duration::from_secs(10));
        assert_eq!(format!("{}", err), "Image fetch timed out after 10s");
    }
}
