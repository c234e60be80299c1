//! Expiry Sweeper
//!
//! Background task that periodically reclaims expired cache entries that no
//! request has touched since they expired.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cache::ExpiryTarget;
use crate::error::{CacheError, Result};

// == Expiry Sweeper ==
/// Owns the lifecycle of the background sweep task.
///
/// Nothing runs until [`start`](Self::start) is called. [`stop`](Self::stop)
/// cancels the task and waits for it to finish; dropping a running sweeper
/// cancels it without waiting.
#[derive(Debug)]
pub struct ExpirySweeper {
    interval: Duration,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ExpirySweeper {
    /// Creates an idle sweeper that will run every `interval` once started.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            interval,
            cancel: CancellationToken::new(),
            handle: None,
        })
    }

    /// Spawns the sweep loop against `target`.
    ///
    /// Calling `start` on a running sweeper is a no-op.
    pub fn start(&mut self, target: Arc<dyn ExpiryTarget>) {
        if self.is_running() {
            warn!("expiry sweeper already running");
            return;
        }
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }

        let interval = self.interval;
        let cancel = self.cancel.clone();

        self.handle = Some(tokio::spawn(async move {
            info!(
                "Starting expiry sweeper with interval of {} seconds",
                interval.as_secs_f64()
            );

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                run_cycle(&target).await;
            }

            debug!("expiry sweeper stopped");
        }));
    }

    /// Cancels the sweep loop and waits for it to exit.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!("expiry sweeper task panicked: {}", e);
                }
            }
        }
    }

    /// Whether the sweep task is alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// == Sweep Cycle ==
/// Runs one sweep, returning the number of entries removed.
///
/// The purge runs in its own task so that a panic is contained like any
/// other failure: it is logged and reported as `None`, and the caller's loop
/// carries on.
pub async fn run_cycle(target: &Arc<dyn ExpiryTarget>) -> Option<usize> {
    let target = Arc::clone(target);

    match tokio::spawn(async move { target.purge_expired().await }).await {
        Ok(Ok(0)) => {
            debug!("Expiry sweep: no expired entries found");
            Some(0)
        }
        Ok(Ok(removed)) => {
            info!("Expiry sweep: removed {} expired entries", removed);
            Some(removed)
        }
        Ok(Err(e)) => {
            error!("Expiry sweep failed: {}", e);
            None
        }
        Err(e) => {
            error!("Expiry sweep aborted: {}", e);
            None
        }
    }
}
