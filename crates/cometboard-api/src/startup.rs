//! Server startup helper for embedding the API next to other work.
//!
//! Provides [`spawn_server`] which launches the HTTP server on a background
//! Tokio task, so a composition root can run it concurrently with the sync
//! worker and its own shutdown handling.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the score API server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the score API server on a background Tokio task.
///
/// Returns a [`JoinHandle`] so the caller can manage the server's lifecycle
/// alongside the sync worker. The address is parse-checked eagerly so an
/// obviously misconfigured deployment fails before the task is spawned.
///
/// # Errors
///
/// Returns [`StartupError::Server`] when the configured address cannot be
/// parsed.
pub fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "score API server exited with error");
        }
    });

    tracing::info!(addr = addr_str, "score API server spawned on background task");

    Ok(handle)
}
