//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired cache entries at a fixed interval

mod sweeper;

pub use sweeper::{run_cycle, ExpirySweeper};
