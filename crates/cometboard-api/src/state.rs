//! Shared application state for the score API server.
//!
//! [`AppState`] wires the transport layer to the intake, the store, and the
//! sync strategy's reader handle. It is composed once at startup and shared
//! immutably behind an [`Arc`](std::sync::Arc); all mutation funnels through
//! the store's atomic upsert.

use std::sync::Arc;
use std::time::Duration;

use cometboard_core::ScoreIntake;
use cometboard_db::ScoreStore;
use cometboard_sync::LeaderboardHandle;

/// Ceiling on how long a leaderboard read waits for the first refresh.
const DEFAULT_FIRST_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything the endpoint handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Validated submission path into the store.
    pub intake: ScoreIntake,
    /// Raw record reads (`GET /scores`, `GET /scores/best`).
    pub store: Arc<dyn ScoreStore>,
    /// Reader handle onto the published leaderboard snapshot.
    pub leaderboard: LeaderboardHandle,
    /// How long a leaderboard read may wait for the first load.
    pub first_load_timeout: Duration,
    /// Whether an accepted write forces a recomputation before the caller
    /// is answered (push deployments). Pull deployments leave this off and
    /// let the timer pick the write up.
    pub refresh_on_write: bool,
}

impl AppState {
    /// Compose the state for a deployment.
    pub fn new(
        store: Arc<dyn ScoreStore>,
        leaderboard: LeaderboardHandle,
        refresh_on_write: bool,
    ) -> Self {
        Self {
            intake: ScoreIntake::new(Arc::clone(&store)),
            store,
            leaderboard,
            first_load_timeout: DEFAULT_FIRST_LOAD_TIMEOUT,
            refresh_on_write,
        }
    }

    /// Override the first-load wait ceiling.
    #[must_use]
    pub const fn with_first_load_timeout(mut self, timeout: Duration) -> Self {
        self.first_load_timeout = timeout;
        self
    }
}
