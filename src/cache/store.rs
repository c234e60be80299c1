//! Cache Store Module
//!
//! Core cache engine: HashMap storage with TTL expiration and
//! least-recently-accessed eviction.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot, MAX_TTL};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded in-memory store with per-entry TTL and LRU eviction.
///
/// The store is synchronous and takes `&mut self` for every operation that
/// touches entries or counters; callers sharing it across tasks wrap it in a
/// lock (see [`MemoryCache`](crate::cache::MemoryCache)).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Fingerprint to entry
    entries: HashMap<String, CacheEntry<V>>,
    /// Cumulative counters
    stats: CacheStats,
    /// Upper bound on `entries.len()`
    max_size: usize,
    /// Lifetime applied when `set` gets no explicit TTL
    default_ttl: Duration,
    /// Monotonic access counter, breaks recency ties within one clock tick
    next_seq: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    ///
    /// Fails when either value is zero or `default_ttl` exceeds [`MAX_TTL`].
    pub fn new(max_size: usize, default_ttl: Duration) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "cache max_size must be greater than zero".to_string(),
            ));
        }
        if default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cache ttl must be greater than zero".to_string(),
            ));
        }
        if default_ttl > MAX_TTL {
            return Err(CacheError::InvalidConfig(format!(
                "cache ttl must not exceed {} seconds",
                MAX_TTL.as_secs()
            )));
        }

        Ok(Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_size,
            default_ttl,
            next_seq: 0,
        })
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    // == Get ==
    /// Returns a clone of the value stored under `key`.
    ///
    /// An expired entry is removed and reported as a miss even if the sweeper
    /// has not reached it yet. A hit refreshes the entry's recency but not its
    /// expiration.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            debug!(key, "cache miss (expired)");
            return None;
        }

        let seq = self.bump_seq();
        let entry = self.entries.get_mut(key)?;
        entry.touch(now, seq);
        self.stats.record_hit();
        debug!(
            key,
            ttl_remaining_ms = entry.ttl_remaining().as_millis() as u64,
            "cache hit"
        );
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, expiring after `ttl` (or the default TTL).
    /// A `ttl` longer than [`MAX_TTL`] is capped.
    ///
    /// Overwriting an existing key never triggers eviction. Inserting a new
    /// key into a full store first evicts the entry with the oldest
    /// `last_accessed`.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_lru();
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        let seq = self.bump_seq();
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cached entry");
        self.entries
            .insert(key, CacheEntry::new(value, ttl, Instant::now(), seq));

        debug_assert!(
            self.entries.len() <= self.max_size,
            "cache holds {} entries, capacity is {}",
            self.entries.len(),
            self.max_size
        );
    }

    // == Evict LRU ==
    /// Removes the least recently accessed entry. Ties fall back to key order.
    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by(|(ka, a), (kb, b)| a.recency().cmp(&b.recency()).then_with(|| ka.cmp(kb)))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "evicted least recently used entry");
        }
    }

    // == Delete ==
    /// Removes an entry, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry. Counters are preserved.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a snapshot of counters and occupancy.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::new(
            self.stats,
            self.entries.len(),
            self.max_size,
            self.default_ttl.as_secs(),
        )
    }

    // == Purge Expired ==
    /// Removes every expired entry, returning how many were dropped.
    ///
    /// Does not touch hit/miss counters.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Whether `key` is currently stored, without touching stats or recency.
    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity limit.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Lifetime applied to entries stored without an explicit TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
