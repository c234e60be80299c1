//! API Module
//!
//! HTTP handlers and routing for the translation service.
//!
//! # Endpoints
//! - `POST /api/v1/translate` - Translate text through the cache
//! - `POST /api/v1/translate/batch` - Translate several texts at once
//! - `GET /api/v1/stats` - Translation usage statistics
//! - `GET /api/v1/cache/stats` - Get cache statistics
//! - `DELETE /api/v1/cache/:key` - Delete one cached translation
//! - `DELETE /api/v1/cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, API_V1};
