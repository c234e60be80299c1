//! Cache Entry Module
//!
//! Defines the fixed-shape record stored for every cached value.

use std::time::{Duration, Instant};

/// Longest lifetime an entry can be given. Longer requests are capped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Cache Entry ==
/// A single cached value with its lifecycle timestamps.
///
/// `expires_at` is fixed at insertion; reads move `last_accessed` forward but
/// never extend the lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion time
    pub created_at: Instant,
    /// Time of the most recent successful read (or insertion)
    pub last_accessed: Instant,
    /// `created_at + ttl`
    pub expires_at: Instant,
    /// Store-wide access sequence number, orders accesses within one clock tick
    pub(crate) access_seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` after `now`, with `ttl`
    /// capped at [`MAX_TTL`].
    pub fn new(value: V, ttl: Duration, now: Instant, access_seq: u64) -> Self {
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or(now);
        Self {
            value,
            created_at: now,
            last_accessed: now,
            expires_at,
            access_seq,
        }
    }

    // == Is Expired ==
    /// Returns true once `now` is strictly past the expiration time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Touch ==
    /// Records a successful read.
    pub(crate) fn touch(&mut self, now: Instant, access_seq: u64) {
        if now > self.last_accessed {
            self.last_accessed = now;
        }
        self.access_seq = access_seq;
    }

    /// Key used to pick the least recently used entry.
    pub(crate) fn recency(&self) -> (Instant, u64) {
        (self.last_accessed, self.access_seq)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
