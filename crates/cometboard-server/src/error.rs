//! Error types for the Cometboard service binary.
//!
//! [`ServiceError`] is the top-level error type that wraps all possible
//! failure modes during service startup.

/// Top-level error for the Cometboard service binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cometboard_core::ConfigError,
    },

    /// Score store initialization failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: cometboard_db::StoreError,
    },

    /// Sync strategy startup failed.
    #[error("sync error: {source}")]
    Sync {
        /// The underlying sync error.
        #[from]
        source: cometboard_sync::SyncError,
    },

    /// HTTP server failed to start.
    #[error("server error: {source}")]
    Server {
        /// The underlying startup error.
        #[from]
        source: cometboard_api::startup::StartupError,
    },
}
