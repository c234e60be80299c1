//! Redis Cache Module
//!
//! Remote key-value backend implementing the same contract as the in-memory
//! cache. Expiry is delegated to the Redis server, so no sweeper is needed.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{CacheBackend, CacheStats, StatsSnapshot, MAX_TTL};
use crate::config::BackendKind;
use crate::error::{CacheError, Result};

/// Namespace for every key this service writes.
pub const KEY_PREFIX: &str = "translation:";

// == Redis Cache ==
/// Redis-backed cache storing JSON-encoded values under `translation:{key}`.
///
/// Hit and miss counters are local to this process. Evictions are performed
/// by the server and are not observable, so they always read as zero.
pub struct RedisCache<V> {
    client: redis::Client,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    _value: PhantomData<fn() -> V>,
}

impl<V> RedisCache<V> {
    /// Creates a cache for the server at `url`.
    ///
    /// The URL is validated here; the connection itself is opened lazily.
    pub fn from_url(url: &str, ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cache ttl must be greater than zero".to_string(),
            ));
        }
        if ttl > MAX_TTL {
            return Err(CacheError::InvalidConfig(format!(
                "cache ttl must not exceed {} seconds",
                MAX_TTL.as_secs()
            )));
        }
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::InvalidConfig(format!("invalid Redis URL: {e}")))?;
        info!(ttl_secs = ttl.as_secs(), "redis cache initialized");

        Ok(Self {
            client,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            _value: PhantomData,
        })
    }

    fn redis_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.connection().await?;
        let raw: Option<String> = con.get(Self::redis_key(key)).await?;
        Ok(raw)
    }

    async fn remove(&self, key: &str) -> Result<i64> {
        let mut con = self.connection().await?;
        let removed: i64 = con.del(Self::redis_key(key)).await?;
        Ok(removed)
    }

    /// Walks every prefixed key with SCAN, handing each batch to `f`.
    async fn scan_prefixed<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(Vec<String>) -> Option<Vec<String>>,
    {
        let mut con = self.connection().await?;
        let pattern = format!("{KEY_PREFIX}*");
        let mut cursor: u64 = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut con)
                .await?;

            if let Some(to_delete) = f(keys) {
                if !to_delete.is_empty() {
                    con.del::<_, ()>(&to_delete).await?;
                }
            }

            cursor = next_cursor;
            if cursor == 0 {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl<V> CacheBackend<V> for RedisCache<V>
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let raw = match self.fetch(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "redis get failed, treating as miss");
                self.record_miss();
                return None;
            }
        };

        let Some(json) = raw else {
            self.record_miss();
            return None;
        };

        match serde_json::from_str(&json) {
            Ok(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "undecodable cached value, treating as miss");
                self.record_miss();
                None
            }
        }
    }

    async fn set(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()> {
        let json = serde_json::to_string(&value)?;
        // EX takes whole seconds and rejects zero
        let secs = ttl.unwrap_or(self.ttl).min(MAX_TTL).as_secs().max(1);

        let mut con = self.connection().await?;
        let _: () = redis::cmd("SET")
            .arg(Self::redis_key(key))
            .arg(json)
            .arg("EX")
            .arg(secs)
            .query_async(&mut con)
            .await?;

        debug!(key, ttl_secs = secs, "cached entry in redis");
        Ok(())
    }

    async fn delete(&self, key: &str) -> bool {
        match self.remove(key).await {
            Ok(removed) => removed > 0,
            Err(e) => {
                warn!(key, error = %e, "redis delete failed");
                false
            }
        }
    }

    async fn clear(&self) {
        match self.scan_prefixed(Some).await {
            Ok(()) => info!("redis cache cleared"),
            Err(e) => warn!(error = %e, "redis clear failed"),
        }
    }

    async fn stats(&self) -> StatsSnapshot {
        let mut size = 0usize;
        if let Err(e) = self
            .scan_prefixed(|keys| {
                size += keys.len();
                None
            })
            .await
        {
            warn!(error = %e, "redis key count failed");
        }

        // Evictions happen server-side and are not observable
        let counters = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: 0,
        };
        StatsSnapshot::new(counters, size, 0, self.ttl.as_secs())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }
}
