//! Error types for the translation cache service
//!
//! Provides unified error handling using thiserror.
//!
//! A missing key is never an error here: lookups return `Option` and
//! deletes return `bool`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the translation cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cached value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote cache backend failure
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// Translation provider failure
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Translation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::InvalidConfig(_)
            | CacheError::Serialization(_)
            | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the translation cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
