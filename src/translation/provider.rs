//! Translation providers.
//!
//! The service talks to models through [`TranslationProvider`]. The only
//! bundled implementation is [`MockTranslator`], a phrase-dictionary stand-in
//! used for development and tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, Result};
use crate::translation::TranslationResult;

/// Confidence reported for dictionary matches.
const KNOWN_PHRASE_CONFIDENCE: f64 = 0.95;
/// Confidence reported for the prefixed fallback.
const FALLBACK_CONFIDENCE: f64 = 0.75;

// == Translation Provider Trait ==
/// A translation model. May be slow and may fail.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Name reported as `model_used`.
    fn name(&self) -> &str;

    /// Translates `text` from `source_lang` to `target_lang`.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResult>;
}

// == Mock Translator ==
/// Dictionary-backed translator with optional simulated latency.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Keyed by `"{source}:{target}"`
    phrases: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    base_latency: Duration,
    per_char_latency: Duration,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslator {
    /// Creates a translator that answers immediately.
    pub fn new() -> Self {
        let mut phrases = HashMap::new();
        phrases.insert(
            "en:hi",
            HashMap::from([
                ("Hello", "नमस्ते"),
                ("Hello world", "नमस्ते संसार"),
                ("How are you?", "आप कैसे हैं?"),
                ("Good morning", "सुप्रभात"),
                ("Thank you", "धन्यवाद"),
                ("Goodbye", "अलविदा"),
            ]),
        );
        phrases.insert(
            "en:ta",
            HashMap::from([
                ("Hello", "வணக்கம்"),
                ("Hello world", "வணக்கம் உலகம்"),
                ("Good morning", "காலை வணக்கம்"),
                ("Thank you", "நன்றி"),
            ]),
        );
        phrases.insert(
            "en:te",
            HashMap::from([
                ("Hello", "నమస్కారం"),
                ("Good morning", "శుభోదయం"),
                ("Thank you", "ధన్యవాదాలు"),
            ]),
        );
        phrases.insert(
            "en:bn",
            HashMap::from([
                ("Hello", "হ্যালো"),
                ("Good morning", "সুপ্রভাত"),
                ("Thank you", "ধন্যবাদ"),
            ]),
        );
        phrases.insert(
            "en:mr",
            HashMap::from([
                ("Hello", "नमस्कार"),
                ("Good morning", "शुभ सकाळ"),
                ("Thank you", "धन्यवाद"),
            ]),
        );

        Self {
            phrases,
            base_latency: Duration::ZERO,
            per_char_latency: Duration::ZERO,
        }
    }

    /// Sleeps `base + per_char * len(text)` before answering.
    pub fn with_latency(mut self, base: Duration, per_char: Duration) -> Self {
        self.base_latency = base;
        self.per_char_latency = per_char;
        self
    }

    fn latency_for(&self, text: &str) -> Duration {
        let chars = text.chars().count() as u32;
        self.base_latency + self.per_char_latency * chars
    }

    fn fallback(text: &str, target_lang: &str) -> String {
        match target_lang {
            "hi" => format!("अनुवादित: {text}"),
            "ta" => format!("மொழிபெயர்க்கப்பட்டது: {text}"),
            "te" => format!("అనువదించబడింది: {text}"),
            "bn" => format!("অনুবাদিত: {text}"),
            "mr" => format!("भाषांतरित: {text}"),
            "en" => format!("Translated: {text}"),
            other => format!("[{other}] {text}"),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResult> {
        if text.trim().is_empty() {
            return Err(CacheError::Translation(
                "text cannot be empty".to_string(),
            ));
        }

        let latency = self.latency_for(text);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let pair = format!("{source_lang}:{target_lang}");
        let known = self
            .phrases
            .get(pair.as_str())
            .and_then(|table| table.get(text));

        let (translated_text, confidence) = match known {
            Some(phrase) => (phrase.to_string(), KNOWN_PHRASE_CONFIDENCE),
            None => (Self::fallback(text, target_lang), FALLBACK_CONFIDENCE),
        };

        Ok(TranslationResult {
            translated_text,
            confidence,
            model_used: self.name().to_string(),
            detected_language: None,
        })
    }
}
