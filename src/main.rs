mod config;
mod db;
mod error;
mod metrics;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StorageBackend};
use crate::db::{create_pool, run_migrations, ContentStore, MemoryContentStore, PgContentStore};
use crate::services::{
    cleanup::{start_cleanup_task, CleanupConfig},
    CatalogService, NotificationInbox,
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub inbox: Arc<NotificationInbox>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ContentStore>) -> Self {
        let catalog = CatalogService::new(store, config.default_page_limit, config.max_page_limit);
        let inbox = Arc::new(NotificationInbox::new(config.notification_capacity));

        Self {
            config,
            catalog,
            inbox,
            start_time: Instant::now(),
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting Movie Catalog Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app_env);

    // Storage
    let store: Arc<dyn ContentStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(&config).await?;
            run_migrations(&pool).await?;

            Arc::new(PgContentStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; content is lost on restart");
            Arc::new(MemoryContentStore::new())
        }
    };

    let cleanup_config = CleanupConfig::from_config(&config);

    // Build application state
    let state = Arc::new(AppState::new(config, store));

    // Start cleanup task (runs in background)
    tokio::spawn(start_cleanup_task(state.inbox.clone(), cleanup_config));

    let app = routes::router(state.clone());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let pending = state.inbox.drain();
    tracing::info!("Server stopped; {} notifications discarded", pending.len());

    Ok(())
}
