//! Translation Usage Statistics
//!
//! Counters describing provider usage, kept apart from the cache counters.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

// == Translation Stats ==
/// Cumulative usage of the translation provider.
///
/// `total_translations` and the breakdowns only count provider calls that
/// succeeded; answers served from the cache are counted separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationStats {
    /// Successful provider calls
    pub total_translations: u64,
    /// Requests answered from the cache
    pub cached_translations: u64,
    /// Provider calls that returned an error
    pub failed_translations: u64,
    /// Seconds spent in successful provider calls
    pub total_processing_time: f64,
    /// `total_processing_time / total_translations`, 0 before the first call
    pub average_processing_time: f64,
    /// Successful calls per model name
    pub translations_by_model: BTreeMap<String, u64>,
    /// Successful calls per `"{source}-{target}"` pair
    pub translations_by_language: BTreeMap<String, u64>,
}

impl TranslationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful provider call.
    pub fn record_translation(
        &mut self,
        source_language: &str,
        target_language: &str,
        model: &str,
        elapsed: Duration,
    ) {
        self.total_translations += 1;
        self.total_processing_time += elapsed.as_secs_f64();
        self.average_processing_time =
            self.total_processing_time / self.total_translations as f64;

        *self
            .translations_by_model
            .entry(model.to_string())
            .or_insert(0) += 1;
        *self
            .translations_by_language
            .entry(format!("{source_language}-{target_language}"))
            .or_insert(0) += 1;
    }

    /// Records a request answered from the cache.
    pub fn record_cache_hit(&mut self) {
        self.cached_translations += 1;
    }

    /// Records a failed provider call.
    pub fn record_failure(&mut self) {
        self.failed_translations += 1;
    }
}
