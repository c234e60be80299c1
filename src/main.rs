//! Translation Cache - translation service fronted by a TTL/LRU result cache

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translation_cache::api::create_router;
use translation_cache::cache::{build_backend, CacheBackend};
use translation_cache::config::BackendKind;
use translation_cache::translation::{CachedTranslation, MockTranslator};
use translation_cache::{AppState, Config, ExpirySweeper};

/// Main entry point for the translation service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Build the configured cache backend
/// 4. Start the expiry sweeper when the backend needs one
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM, then stop the sweeper and drop cached entries
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translation_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting translation service");

    let config = Config::from_env().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: backend={}, max_size={}, ttl={}s, sweep_interval={}s, port={}",
        config.backend,
        config.max_size,
        config.ttl_seconds,
        config.sweep_interval_seconds,
        config.server_port
    );

    let handle = build_backend::<CachedTranslation>(&config)
        .context("failed to initialize cache backend")?;

    let mut sweeper = ExpirySweeper::new(config.sweep_interval())?;
    if let Some(target) = handle.expiry.clone() {
        sweeper.start(target);
        info!("Expiry sweeper started");
    }

    let provider = MockTranslator::new()
        .with_latency(Duration::from_millis(100), Duration::from_millis(1));
    let state = AppState::from_handle(&handle, provider);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.stop().await;
    info!("Expiry sweeper stopped");

    // The remote store outlives this process; only local entries are dropped
    if handle.cache.kind() == BackendKind::Memory {
        handle.cache.clear().await;
    }
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
