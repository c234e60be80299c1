//! Fingerprint Module
//!
//! Derives stable cache keys from translation request parameters.

use sha2::{Digest, Sha256};

/// Separator written between fields before hashing.
///
/// The unit separator cannot appear in a language code or model name typed by
/// a client, so distinct tuples never join into the same byte string.
const FIELD_SEPARATOR: &[u8] = b"\x1f";

// == Fingerprint ==
/// Computes the cache key for a translation request.
///
/// The key is the lowercase hex SHA-256 digest of the four fields in order.
/// Inputs are hashed as-is, so the key is case sensitive.
pub fn fingerprint(text: &str, source_lang: &str, target_lang: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    for (i, field) in [text, source_lang, target_lang, model].iter().enumerate() {
        if i > 0 {
            hasher.update(FIELD_SEPARATOR);
        }
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
