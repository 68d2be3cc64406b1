//! Error types for the movies gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movie_provider::ProviderError;
use serde_json::json;
use thiserror::Error;

/// Message returned for any upstream failure that is not a missing title
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong. Please try again later. or contact the developers.";

/// Start-up failures
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tracing_subscriber::filter::ParseError> for GatewayError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        GatewayError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Request error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream provider error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotFound(_) => AppError::NotFound("Media Not found.".into()),
            other => AppError::Upstream(other),
        }
    }
}
