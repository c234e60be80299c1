//! Cache Backend Module
//!
//! The async contract shared by every cache backend, the in-memory
//! implementation, and construction from configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStore, RedisCache, StatsSnapshot};
use crate::config::{BackendKind, Config};
use crate::error::Result;

// == Cache Backend Trait ==
/// Operations the request path uses, independent of where entries live.
///
/// Lookups and deletes never fail: an unreachable remote store reads as a
/// miss. `set` reports encoding or transport errors so the caller can log
/// them.
#[async_trait]
pub trait CacheBackend<V: Send + 'static>: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Option<V>;

    /// Stores `value`, expiring after `ttl` or the backend default.
    async fn set(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()>;

    /// Removes `key`, returning whether it was present.
    async fn delete(&self, key: &str) -> bool;

    /// Removes every entry. Counters are kept.
    async fn clear(&self);

    /// Point-in-time statistics.
    async fn stats(&self) -> StatsSnapshot;

    /// Which backend this is.
    fn kind(&self) -> BackendKind;
}

// == Expiry Target Trait ==
/// A cache whose expired entries must be reclaimed by a background sweep.
#[async_trait]
pub trait ExpiryTarget: Send + Sync {
    /// Drops expired entries, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize>;
}

/// Shared handle to a cache backend.
pub type SharedCache<V> = Arc<dyn CacheBackend<V>>;

// == Memory Cache ==
/// [`CacheStore`] behind an async lock.
///
/// Every operation that mutates entries or counters, `get` included, takes
/// the write lock, so capacity check and insertion happen atomically.
#[derive(Debug)]
pub struct MemoryCache<V> {
    store: RwLock<CacheStore<V>>,
}

impl<V: Clone + Send + Sync + 'static> MemoryCache<V> {
    /// Creates an empty cache. Fails on a zero capacity or TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Result<Self> {
        let store = CacheStore::new(max_size, default_ttl)?;
        info!(
            max_size,
            ttl_secs = default_ttl.as_secs(),
            "in-memory cache initialized"
        );
        Ok(Self {
            store: RwLock::new(store),
        })
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> CacheBackend<V> for MemoryCache<V> {
    async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    async fn set(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()> {
        self.store.write().await.set(key.to_string(), value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    async fn clear(&self) {
        self.store.write().await.clear();
        info!("cache cleared");
    }

    async fn stats(&self) -> StatsSnapshot {
        self.store.read().await.stats()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> ExpiryTarget for MemoryCache<V> {
    async fn purge_expired(&self) -> Result<usize> {
        let mut store = self.store.write().await;
        let removed = store.purge_expired();
        debug!(removed, remaining = store.len(), "purged expired entries");
        Ok(removed)
    }
}

// == Cache Handle ==
/// A constructed backend plus, when it needs one, the target for the sweeper.
pub struct CacheHandle<V: Send + 'static> {
    /// Backend used by the request path
    pub cache: SharedCache<V>,
    /// Present only for backends that keep expired entries in memory
    pub expiry: Option<Arc<dyn ExpiryTarget>>,
}

/// Builds the backend selected by `config.backend`.
pub fn build_backend<V>(config: &Config) -> Result<CacheHandle<V>>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    config.validate()?;

    match config.backend {
        BackendKind::Memory => {
            let memory = Arc::new(MemoryCache::<V>::new(config.max_size, config.ttl())?);
            let expiry: Arc<dyn ExpiryTarget> = memory.clone();
            Ok(CacheHandle {
                cache: memory,
                expiry: Some(expiry),
            })
        }
        BackendKind::Redis => {
            let redis = RedisCache::<V>::from_url(&config.redis_url, config.ttl())?;
            Ok(CacheHandle {
                cache: Arc::new(redis),
                expiry: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_cache(max_size: usize) -> MemoryCache<String> {
        MemoryCache::new(max_size, Duration::from_secs(300)).unwrap()
    }

    #[tokio::test]
    async fn test_memory_cache_roundtrip() {
        let cache = memory_cache(10);

        cache.set("k", "v".to_string(), None).await.unwrap();

        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        assert!(cache.delete("k").await);
        assert!(!cache.delete("k").await);
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_clear_keeps_counters() {
        let cache = memory_cache(10);

        cache.set("k", "v".to_string(), None).await.unwrap();
        cache.get("k").await;
        cache.get("missing").await;
        cache.clear().await;

        let stats = cache.stats().await;
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(cache.kind(), BackendKind::Memory);
    }

    #[tokio::test]
    async fn test_memory_cache_purge_expired() {
        let cache = memory_cache(10);

        cache
            .set("short", "v".to_string(), Some(Duration::from_millis(30)))
            .await
            .unwrap();
        cache.set("long", "v".to_string(), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.purge_expired().await.unwrap(), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.size, 1);
        assert_eq!(stats.misses, 0);
        assert_eq!(cache.get("long").await.as_deref(), Some("v"));
    }

    #[test]
    fn test_build_memory_backend() {
        let handle = build_backend::<String>(&Config::default()).unwrap();
        assert_eq!(handle.cache.kind(), BackendKind::Memory);
        assert!(handle.expiry.is_some());
    }

    #[test]
    fn test_build_redis_backend_without_sweeper() {
        let config = Config {
            backend: BackendKind::Redis,
            ..Config::default()
        };
        let handle = build_backend::<String>(&config).unwrap();
        assert_eq!(handle.cache.kind(), BackendKind::Redis);
        assert!(handle.expiry.is_none());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = Config {
            max_size: 0,
            ..Config::default()
        };
        assert!(build_backend::<String>(&config).is_err());
    }
}
