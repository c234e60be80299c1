//! Translation Module
//!
//! Provider abstraction, the mock dictionary translator, and the service that
//! fronts providers with the result cache.

mod provider;
mod service;
mod stats;
mod types;

pub use provider::{MockTranslator, TranslationProvider};
pub use service::{TranslationOutcome, TranslationQuery, TranslationService, MAX_BATCH_SIZE};
pub use stats::TranslationStats;
pub use types::{CachedTranslation, TranslationResult, DEFAULT_MODEL};
