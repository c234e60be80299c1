//! API Routes
//!
//! Configures the Axum router with all translation service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_translate_handler, cache_clear_handler, cache_delete_handler, cache_stats_handler,
    health_handler, translate_handler, translation_stats_handler, AppState,
};

/// Prefix shared by the versioned endpoints.
pub const API_V1: &str = "/api/v1";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/v1/translate` - Translate text
/// - `POST /api/v1/translate/batch` - Translate up to 10 texts concurrently
/// - `GET /api/v1/stats` - Translation usage and cache statistics
/// - `GET /api/v1/cache/stats` - Cache statistics
/// - `DELETE /api/v1/cache/:key` - Drop one cached translation
/// - `DELETE /api/v1/cache` - Drop every cached translation
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/translate", post(translate_handler))
        .route("/translate/batch", post(batch_translate_handler))
        .route("/stats", get(translation_stats_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/:key", delete(cache_delete_handler))
        .route("/cache", delete(cache_clear_handler));

    Router::new()
        .nest(API_V1, api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
