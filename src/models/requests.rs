//! Request DTOs for the translation API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::translation::TranslationQuery;

/// Request body for POST /api/v1/translate
///
/// # Fields
/// - `text`: Text to translate
/// - `source_language` / `target_language`: Language codes
/// - `model`: Optional model name (defaults to "auto")
/// - `enable_cache`: Whether the cache may be used (defaults to true)
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_enable_cache")]
    pub enable_cache: bool,
}

fn default_enable_cache() -> bool {
    true
}

impl TranslateRequest {
    /// Borrowed view handed to the translation service.
    pub fn as_query(&self) -> TranslationQuery<'_> {
        TranslationQuery {
            text: &self.text,
            source_language: &self.source_language,
            target_language: &self.target_language,
            model: self.model.as_deref(),
            use_cache: self.enable_cache,
        }
    }
}

/// Request body for POST /api/v1/translate/batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchTranslateRequest {
    pub requests: Vec<TranslateRequest>,
}

impl BatchTranslateRequest {
    /// One query per item, in request order.
    pub fn as_queries(&self) -> Vec<TranslationQuery<'_>> {
        self.requests.iter().map(TranslateRequest::as_query).collect()
    }
}
