//! Score API server (Axum HTTP) for the Cometboard service.
//!
//! A thin transport layer over the intake, store, and sync strategy: it
//! validates wire input, delegates, and maps errors to status codes. No
//! ranking logic lives here.
//!
//! # Modules
//!
//! - [`router`] -- Axum router construction
//! - [`handlers`] -- REST endpoint handlers
//! - [`state`] -- Shared application state
//! - [`error`] -- Error-to-response mapping
//! - [`server`] -- HTTP server lifecycle
//! - [`startup`] -- Background-task spawn helper

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use startup::spawn_server;
pub use state::AppState;
