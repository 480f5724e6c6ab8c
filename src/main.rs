//! Taskboard - a priority task board backend
//!
//! Serves task CRUD over HTTP with a read-through, write-invalidate cache
//! holding the full task list.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard::api::create_router;
use taskboard::cache::MemoryCache;
use taskboard::store::{FileTaskStore, MemoryTaskStore, TaskStore};
use taskboard::{spawn_cleanup_task, AppState, Config, TaskService};

/// Main entry point for the task board server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the task store and the list cache
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Taskboard server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, cleanup_interval={}s, body_limit={}B",
        config.server_port, config.cache_ttl, config.cleanup_interval, config.body_limit
    );

    let cache = MemoryCache::new();
    let cleanup_handle = spawn_cleanup_task(cache.store(), config.cleanup_interval);

    let store: Arc<dyn TaskStore> = match &config.data_file {
        Some(path) => {
            let store = FileTaskStore::open(path)
                .await
                .with_context(|| format!("failed to open task file {}", path.display()))?;
            info!("Tasks persisted to {}", store.path().display());
            Arc::new(store)
        }
        None => {
            warn!("DATA_FILE is empty, tasks are kept in memory only");
            Arc::new(MemoryTaskStore::new())
        }
    };

    let service = TaskService::new(store, Arc::new(cache), config.cache_ttl);
    let (store_ok, cache_ok) = service.health().await;
    info!(store_ok, cache_ok, "Task store and cache initialized");

    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
    }
    let app = create_router(AppState::new(service), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    cleanup_handle.abort();
    warn!("Cache cleanup task aborted");
}
