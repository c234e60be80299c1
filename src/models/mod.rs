//! Request and Response models for the translation API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchTranslateRequest, TranslateRequest};
pub use responses::{
    BatchItemResponse, BatchTranslateResponse, CacheStatsResponse, ClearResponse,
    DeleteResponse, ErrorResponse, HealthResponse, TranslateResponse, TranslationStatsResponse,
};
