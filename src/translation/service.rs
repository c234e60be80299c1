//! Translation Service
//!
//! Puts the cache in front of a translation provider: fingerprint the
//! request, serve hits from the cache, and store only successful results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{fingerprint, SharedCache};
use crate::error::{CacheError, Result};
use crate::translation::{
    CachedTranslation, TranslationProvider, TranslationStats, DEFAULT_MODEL,
};

/// Largest number of requests accepted in one batch.
pub const MAX_BATCH_SIZE: usize = 10;

/// Parameters of one translation request.
#[derive(Debug, Clone, Copy)]
pub struct TranslationQuery<'a> {
    pub text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    /// Defaults to `"auto"`
    pub model: Option<&'a str>,
    /// When false the cache is neither read nor written
    pub use_cache: bool,
}

impl TranslationQuery<'_> {
    fn model(&self) -> &str {
        self.model.unwrap_or(DEFAULT_MODEL)
    }

    /// Cache key for this request.
    pub fn cache_key(&self) -> String {
        fingerprint(
            self.text,
            self.source_language,
            self.target_language,
            self.model(),
        )
    }

    /// Rejects blank text and blank language codes.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Text cannot be empty".to_string(),
            ));
        }
        if self.source_language.trim().is_empty() || self.target_language.trim().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Language codes cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A translation together with where it came from.
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub translation: CachedTranslation,
    /// True when served from the cache
    pub cached: bool,
    /// Time spent serving the request
    pub elapsed: Duration,
}

// == Translation Service ==
/// Request handler core, with the cache and provider injected explicitly.
#[derive(Clone)]
pub struct TranslationService {
    cache: SharedCache<CachedTranslation>,
    provider: Arc<dyn TranslationProvider>,
    stats: Arc<RwLock<TranslationStats>>,
}

impl TranslationService {
    pub fn new(
        cache: SharedCache<CachedTranslation>,
        provider: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            cache,
            provider,
            stats: Arc::new(RwLock::new(TranslationStats::new())),
        }
    }

    /// The cache this service reads and writes.
    pub fn cache(&self) -> &SharedCache<CachedTranslation> {
        &self.cache
    }

    /// Snapshot of provider usage.
    pub async fn stats(&self) -> TranslationStats {
        self.stats.read().await.clone()
    }

    /// Translates a request, consulting the cache first.
    ///
    /// Provider failures are returned to the caller and never cached. A
    /// failure to store a fresh result is logged and does not fail the
    /// request.
    pub async fn translate(&self, query: TranslationQuery<'_>) -> Result<TranslationOutcome> {
        query.validate()?;
        let started = Instant::now();
        let cache_key = query.use_cache.then(|| query.cache_key());

        if let Some(key) = &cache_key {
            if let Some(translation) = self.cache.get(key).await {
                debug!(
                    key = %key,
                    source = query.source_language,
                    target = query.target_language,
                    "translation cache hit"
                );
                self.stats.write().await.record_cache_hit();
                return Ok(TranslationOutcome {
                    translation,
                    cached: true,
                    elapsed: started.elapsed(),
                });
            }
            debug!(
                key = %key,
                source = query.source_language,
                target = query.target_language,
                "translation cache miss"
            );
        }

        let result = match self
            .provider
            .translate(query.text, query.source_language, query.target_language)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    source = query.source_language,
                    target = query.target_language,
                    model = query.model(),
                    error = %e,
                    "translation failed"
                );
                self.stats.write().await.record_failure();
                return Err(e);
            }
        };
        let provider_time = started.elapsed();

        let translation =
            CachedTranslation::from_result(result, query.source_language, query.target_language);
        self.stats.write().await.record_translation(
            query.source_language,
            query.target_language,
            &translation.model_used,
            provider_time,
        );

        if let Some(key) = &cache_key {
            if let Err(e) = self.cache.set(key, translation.clone(), None).await {
                warn!(key = %key, error = %e, "failed to cache translation");
            }
        }

        info!(
            "Translation completed: {}->{} using {}",
            query.source_language, query.target_language, translation.model_used
        );

        Ok(TranslationOutcome {
            translation,
            cached: false,
            elapsed: started.elapsed(),
        })
    }

    /// Translates up to [`MAX_BATCH_SIZE`] requests concurrently.
    ///
    /// Each item goes through [`translate`](Self::translate) and fails on its
    /// own; only an empty or oversized batch is rejected as a whole.
    pub async fn translate_batch(
        &self,
        queries: &[TranslationQuery<'_>],
    ) -> Result<Vec<Result<TranslationOutcome>>> {
        if queries.is_empty() {
            return Err(CacheError::InvalidRequest(
                "At least one translation request is required".to_string(),
            ));
        }
        if queries.len() > MAX_BATCH_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Maximum {} translation requests allowed per batch",
                MAX_BATCH_SIZE
            )));
        }

        info!("Batch translation request: {} items", queries.len());
        let results = join_all(queries.iter().map(|query| self.translate(*query))).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("Batch translation: {} of {} items failed", failed, results.len());
        }
        Ok(results)
    }
}
