//! Cometboard service binary.
//!
//! This is the main entry point that wires together the score store, the
//! leaderboard sync strategy, and the HTTP API. It loads configuration,
//! initializes all subsystems, and serves until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `cometboard.yaml`
//! 3. Create the score store (memory or `PostgreSQL`)
//! 4. Start the sync strategy (push or pull)
//! 5. Compose the application state and start the HTTP server
//! 6. Wait for Ctrl-C, then shut the sync worker down

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cometboard_api::{spawn_server, AppState, ServerConfig};
use cometboard_core::{ScoreboardConfig, StoreBackend, SyncMode};
use cometboard_db::{MemoryScoreStore, PostgresScoreStore, PostgresStoreConfig, ScoreStore};
use cometboard_sync::{LeaderboardHandle, PullSync, PushSync};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServiceError;

/// The running sync strategy, either flavor.
///
/// Held by `main` so the worker stays alive for the life of the process
/// and can be shut down cleanly on Ctrl-C.
enum SyncStrategy {
    /// Change-feed driven refresh.
    Push(PushSync),
    /// Timer driven refresh.
    Pull(PullSync),
}

impl SyncStrategy {
    /// A reader handle onto the published snapshot.
    fn handle(&self) -> LeaderboardHandle {
        match self {
            Self::Push(sync) => sync.handle(),
            Self::Pull(sync) => sync.handle(),
        }
    }

    /// Stop the refresh worker and wait for it to exit.
    async fn shutdown(self) {
        match self {
            Self::Push(sync) => sync.shutdown().await,
            Self::Pull(sync) => sync.shutdown().await,
        }
    }
}

/// Application entry point for the Cometboard service.
///
/// Initializes all subsystems and serves HTTP until interrupted.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("cometboard-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        backend = ?config.store.backend,
        sync_mode = ?config.sync.mode,
        host = config.server.host,
        port = config.server.port,
        leaderboard_limit = config.sync.limit,
        "configuration loaded"
    );

    // 3. Create the score store.
    let store: Arc<dyn ScoreStore> = match config.store.backend {
        StoreBackend::Memory => {
            info!("using in-memory score store");
            Arc::new(MemoryScoreStore::new())
        }
        StoreBackend::Postgres => {
            let pg_config = PostgresStoreConfig::new(&config.store.postgres_url)
                .with_max_connections(config.store.max_connections);
            let store = PostgresScoreStore::connect(&pg_config).await?;
            store.run_migrations().await?;
            info!(
                max_connections = config.store.max_connections,
                "PostgreSQL score store connected, migrations applied"
            );
            Arc::new(store)
        }
    };

    // 4. Start the sync strategy. Push mode needs the store's native change
    //    feed, which the relational backend does not have; that mismatch is
    //    a startup error, not something to degrade around silently.
    let sync = match config.sync.mode {
        SyncMode::Push => {
            if config.store.backend == StoreBackend::Postgres {
                warn!("push sync requires a change feed; the postgres backend has none");
            }
            SyncStrategy::Push(PushSync::spawn(Arc::clone(&store), config.sync.limit)?)
        }
        SyncMode::Pull => {
            let period = Duration::from_secs(config.sync.refresh_interval_secs);
            SyncStrategy::Pull(PullSync::spawn(Arc::clone(&store), period, config.sync.limit))
        }
    };

    // 5. Compose application state and start the HTTP server.
    let refresh_on_write = config.sync.mode == SyncMode::Push;
    let state = AppState::new(Arc::clone(&store), sync.handle(), refresh_on_write)
        .with_first_load_timeout(Duration::from_secs(config.sync.first_load_timeout_secs));

    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    let server_handle = spawn_server(server_config, Arc::new(state))?;

    info!("cometboard-server ready");

    // 6. Serve until interrupted, then stop the refresh worker.
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }

    info!("shutdown signal received, stopping");
    server_handle.abort();
    sync.shutdown().await;

    info!("cometboard-server shutdown complete");
    Ok(())
}

/// Load the service configuration from `cometboard.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// A missing file yields the defaults (in-memory store, push sync), with
/// `DATABASE_URL` and `PORT` environment overrides still applied.
fn load_config() -> Result<ScoreboardConfig, ServiceError> {
    let config_path = Path::new("cometboard.yaml");
    if config_path.exists() {
        let config = ScoreboardConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("config file not found, using defaults");
        Ok(ScoreboardConfig::parse("{}")?)
    }
}
