//! Cache Statistics Module
//!
//! Tracks cache performance counters and produces read-only snapshots.

use serde::{Deserialize, Serialize};

/// Rough per-entry footprint used for the memory estimate.
const ESTIMATED_ENTRY_BYTES: usize = 1024;

// == Cache Stats ==
/// Cumulative counters for the lifetime of a store.
///
/// Counters only ever increase; clearing the cache leaves them intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed to make room for a new key
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

/// Hit rate with zero lookups reported as 0.0.
fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Best-effort memory estimate in megabytes.
fn estimate_memory_mb(entries: usize) -> f64 {
    (entries * ESTIMATED_ENTRY_BYTES) as f64 / (1024.0 * 1024.0)
}

// == Stats Snapshot ==
/// Point-in-time view of a cache, safe to hand out to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Entries currently held
    pub size: usize,
    /// Capacity limit
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
    /// Default lifetime applied to new entries
    pub ttl_seconds: u64,
    /// Telemetry only, not a measurement
    pub memory_usage_estimate_mb: f64,
}

impl StatsSnapshot {
    /// Builds a snapshot from counters and the current entry count.
    pub fn new(stats: CacheStats, size: usize, max_size: usize, ttl_seconds: u64) -> Self {
        Self {
            size,
            max_size,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
            ttl_seconds,
            memory_usage_estimate_mb: estimate_memory_mb(size),
        }
    }
}
