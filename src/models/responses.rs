//! Response DTOs for the translation API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::StatsSnapshot;
use crate::error::Result;
use crate::translation::{TranslationOutcome, TranslationStats};

/// Response body for POST /api/v1/translate
#[derive(Debug, Clone, Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub confidence_score: f64,
    pub model_used: String,
    /// Seconds spent serving this request
    pub processing_time: f64,
    /// Whether the result came from the cache
    pub cached: bool,
    pub detected_language: Option<String>,
}

impl TranslateResponse {
    /// Builds the response from a service outcome.
    pub fn new(outcome: TranslationOutcome) -> Self {
        let processing_time = outcome.elapsed.as_secs_f64();
        let t = outcome.translation;
        Self {
            translated_text: t.translated_text,
            source_language: t.source_language,
            target_language: t.target_language,
            confidence_score: t.confidence,
            model_used: t.model_used,
            processing_time,
            cached: outcome.cached,
            detected_language: t.detected_language,
        }
    }
}

/// One item of a batch response: a translation or the reason it failed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchItemResponse {
    Translated(TranslateResponse),
    Failed(ErrorResponse),
}

/// Response body for POST /api/v1/translate/batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchTranslateResponse {
    /// One entry per request, in request order
    pub results: Vec<BatchItemResponse>,
    pub success_count: usize,
    pub error_count: usize,
    /// Seconds spent on the whole batch
    pub total_processing_time: f64,
}

impl BatchTranslateResponse {
    pub fn new(results: Vec<Result<TranslationOutcome>>, elapsed: Duration) -> Self {
        let results: Vec<BatchItemResponse> = results
            .into_iter()
            .map(|result| match result {
                Ok(outcome) => BatchItemResponse::Translated(TranslateResponse::new(outcome)),
                Err(e) => BatchItemResponse::Failed(ErrorResponse::new(e.to_string())),
            })
            .collect();
        let error_count = results
            .iter()
            .filter(|item| matches!(item, BatchItemResponse::Failed(_)))
            .count();

        Self {
            success_count: results.len() - error_count,
            error_count,
            results,
            total_processing_time: elapsed.as_secs_f64(),
        }
    }
}

/// Response body for GET /api/v1/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Backend name ("memory" or "redis")
    pub backend: String,
    #[serde(flatten)]
    pub stats: StatsSnapshot,
}

impl CacheStatsResponse {
    pub fn new(backend: impl Into<String>, stats: StatsSnapshot) -> Self {
        Self {
            backend: backend.into(),
            stats,
        }
    }
}

/// Response body for GET /api/v1/stats
#[derive(Debug, Clone, Serialize)]
pub struct TranslationStatsResponse {
    pub translation_stats: TranslationStats,
    pub cache_stats: CacheStatsResponse,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl TranslationStatsResponse {
    pub fn new(translation_stats: TranslationStats, cache_stats: CacheStatsResponse) -> Self {
        Self {
            translation_stats,
            cache_stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for DELETE /api/v1/cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry was removed
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        Self {
            key: key.into(),
            deleted,
        }
    }
}

/// Response body for DELETE /api/v1/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Cache statistics at the time of the check
    pub cache: CacheStatsResponse,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: CacheStatsResponse) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
