//! Axum router construction for the score API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin game-client access.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the score server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /scores` -- all score records, best first
/// - `POST /scores` -- submit a score
/// - `GET /scores/best` -- best record for one difficulty
/// - `GET /leaderboard` -- published leaderboard snapshot
///
/// CORS is configured to allow any origin for development. In production
/// this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route(
            "/scores",
            get(handlers::list_scores).post(handlers::submit_score),
        )
        .route("/scores/best", get(handlers::get_best))
        .route("/leaderboard", get(handlers::get_leaderboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
