//! Translation data types shared by providers, the service and the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model name used when the caller does not ask for one.
pub const DEFAULT_MODEL: &str = "auto";

/// Output of a translation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub translated_text: String,
    /// In `[0, 1]`
    pub confidence: f64,
    pub model_used: String,
    pub detected_language: Option<String>,
}

/// Value stored in the cache for a successful translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTranslation {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub confidence: f64,
    pub model_used: String,
    #[serde(default)]
    pub detected_language: Option<String>,
    /// When the provider produced this result
    pub cached_at: DateTime<Utc>,
}

impl CachedTranslation {
    /// Wraps a provider result with its language pair.
    pub fn from_result(
        result: TranslationResult,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            translated_text: result.translated_text,
            source_language: source_language.into(),
            target_language: target_language.into(),
            confidence: result.confidence,
            model_used: result.model_used,
            detected_language: result.detected_language,
            cached_at: Utc::now(),
        }
    }
}
