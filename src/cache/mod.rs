//! Cache Module
//!
//! Translation result caching: key fingerprints, the bounded TTL/LRU store,
//! and the backends built on top of it.

mod backend;
mod entry;
mod fingerprint;
mod remote;
mod stats;
mod store;


// Re-export public types
pub use backend::{
    build_backend, CacheBackend, CacheHandle, ExpiryTarget, MemoryCache, SharedCache,
};
pub use entry::{CacheEntry, MAX_TTL};
pub use fingerprint::fingerprint;
pub use remote::{RedisCache, KEY_PREFIX};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
