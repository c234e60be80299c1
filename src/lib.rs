//! Translation Cache - a translation service fronted by a TTL/LRU result cache
//!
//! Repeated translation requests are answered from an in-process cache with
//! capacity-bounded least-recently-used eviction, fixed per-entry lifetimes and
//! a background expiry sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod translation;

pub use api::AppState;
pub use config::Config;
pub use tasks::ExpirySweeper;
