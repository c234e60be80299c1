//! Configuration Module
//!
//! Handles loading and validating service configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::MAX_TTL;
use crate::error::{CacheError, Result};

// == Backend Kind ==
/// Which cache backend the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process TTL/LRU store
    Memory,
    /// Remote Redis server
    Redis,
}

impl FromStr for BackendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown cache type '{}', expected 'memory' or 'redis'",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Redis => write!(f, "redis"),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the in-memory cache can hold
    pub max_size: usize,
    /// Lifetime in seconds applied to new cache entries
    pub ttl_seconds: u64,
    /// Interval in seconds between expiry sweeps
    pub sweep_interval_seconds: u64,
    /// Cache backend selection
    pub backend: BackendKind,
    /// Connection URL used by the Redis backend
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_SECONDS` - Entry lifetime in seconds (default: 3600)
    /// - `CACHE_SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 300)
    /// - `CACHE_TYPE` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://localhost:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    ///
    /// Numeric values that fail to parse fall back to their defaults. An
    /// unknown `CACHE_TYPE` is rejected.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let backend = match env::var("CACHE_TYPE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.backend,
        };

        Ok(Self {
            max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.max_size),
            ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(defaults.ttl_seconds),
            sweep_interval_seconds: parse_var("CACHE_SWEEP_INTERVAL")
                .unwrap_or(defaults.sweep_interval_seconds),
            backend,
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        })
    }

    /// Rejects values that would make the cache unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.ttl_seconds == 0 {
            return Err(CacheError::InvalidConfig(
                "ttl_seconds must be greater than zero".to_string(),
            ));
        }
        if self.ttl_seconds > MAX_TTL.as_secs() {
            return Err(CacheError::InvalidConfig(format!(
                "ttl_seconds must not exceed {}",
                MAX_TTL.as_secs()
            )));
        }
        if self.sweep_interval_seconds == 0 {
            return Err(CacheError::InvalidConfig(
                "sweep_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Default entry lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Time between two expiry sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 1000,
            ttl_seconds: 3600,
            sweep_interval_seconds: 300,
            backend: BackendKind::Memory,
            redis_url: "redis://localhost:6379".to_string(),
            server_port: 8000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.ttl_seconds, 3600);
        assert_eq!(config.sweep_interval_seconds, 300);
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.server_port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_SWEEP_INTERVAL");
        env::remove_var("CACHE_TYPE");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.ttl_seconds, 3600);
        assert_eq!(config.sweep_interval_seconds, 300);
        assert_eq!(config.backend, BackendKind::Memory);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = Config {
            max_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));

        let config = Config {
            ttl_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            sweep_interval_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_ttl() {
        let config = Config {
            ttl_seconds: u64::MAX,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));

        let config = Config {
            ttl_seconds: MAX_TTL.as_secs(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert_eq!(" Redis ".parse::<BackendKind>().unwrap(), BackendKind::Redis);
        assert!("memcached".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
    }
}
