//! API Handlers
//!
//! HTTP request handlers for each translation service endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheHandle, SharedCache};
use crate::error::Result;
use crate::models::{
    BatchTranslateRequest, BatchTranslateResponse, CacheStatsResponse, ClearResponse,
    DeleteResponse, HealthResponse, TranslateRequest, TranslateResponse,
    TranslationStatsResponse,
};
use crate::translation::{
    CachedTranslation, MockTranslator, TranslationProvider, TranslationService,
};

/// Application state shared across all handlers.
///
/// Holds the translation service, which owns the injected cache backend.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<TranslationService>,
}

impl AppState {
    /// Creates a new AppState around a cache and a provider.
    pub fn new(
        cache: SharedCache<CachedTranslation>,
        provider: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            translator: Arc::new(TranslationService::new(cache, provider)),
        }
    }

    /// Creates a new AppState from a built cache backend, using the mock
    /// translator.
    pub fn from_handle(handle: &CacheHandle<CachedTranslation>, provider: MockTranslator) -> Self {
        Self::new(handle.cache.clone(), Arc::new(provider))
    }

    /// The cache backend behind the service.
    pub fn cache(&self) -> &SharedCache<CachedTranslation> {
        self.translator.cache()
    }

    async fn stats_response(&self) -> CacheStatsResponse {
        let cache = self.cache();
        CacheStatsResponse::new(cache.kind().to_string(), cache.stats().await)
    }
}

/// Handler for POST /api/v1/translate
///
/// Translates text, serving repeated requests from the cache.
pub async fn translate_handler(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let outcome = state.translator.translate(req.as_query()).await?;
    Ok(Json(TranslateResponse::new(outcome)))
}

/// Handler for POST /api/v1/translate/batch
///
/// Items are translated concurrently; a failing item is reported in place
/// and does not fail the batch.
pub async fn batch_translate_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchTranslateRequest>,
) -> Result<Json<BatchTranslateResponse>> {
    let started = Instant::now();
    let results = state.translator.translate_batch(&req.as_queries()).await?;
    Ok(Json(BatchTranslateResponse::new(results, started.elapsed())))
}

/// Handler for GET /api/v1/stats
///
/// Provider usage next to the cache statistics.
pub async fn translation_stats_handler(
    State(state): State<AppState>,
) -> Json<TranslationStatsResponse> {
    let translation_stats = state.translator.stats().await;
    Json(TranslationStatsResponse::new(
        translation_stats,
        state.stats_response().await,
    ))
}

/// Handler for GET /api/v1/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.stats_response().await)
}

/// Handler for DELETE /api/v1/cache/:key
///
/// Deleting a missing key is not an error; `deleted` reports the outcome.
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache().delete(&key).await;
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for DELETE /api/v1/cache
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache().clear().await;
    Json(ClearResponse::cleared())
}

/// Handler for GET /health
///
/// Returns health status of the service with current cache statistics.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.stats_response().await))
}
