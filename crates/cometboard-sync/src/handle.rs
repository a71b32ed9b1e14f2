//! Reader-side handle over the published leaderboard snapshot.
//!
//! Readers borrow the latest immutable snapshot through the handle instead
//! of sharing mutable state with the refresh worker, and waiting for the
//! first load is a real wakeup on a [`watch`] channel under a deadline --
//! not a poll loop.

use std::sync::Arc;
use std::time::Duration;

use cometboard_types::LeaderboardSnapshot;
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::SyncError;
use crate::refresh::Published;

/// Commands a handle can send to its background worker.
pub(crate) enum RefreshCommand {
    /// Run a recomputation pass now; ack when the pass has completed
    /// (successfully or not).
    Refresh(oneshot::Sender<()>),
}

/// Clonable reader view onto the published leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardHandle {
    snapshot: watch::Receiver<Published>,
    commands: mpsc::Sender<RefreshCommand>,
}

impl LeaderboardHandle {
    pub(crate) const fn new(
        snapshot: watch::Receiver<Published>,
        commands: mpsc::Sender<RefreshCommand>,
    ) -> Self {
        Self { snapshot, commands }
    }

    /// The latest published snapshot, or `None` before the first successful
    /// refresh.
    pub fn current(&self) -> Option<Arc<LeaderboardSnapshot>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    ///
    /// This is the push-based live-update surface: observers (a `WebSocket`
    /// feed, a UI screen) await changes instead of re-querying.
    pub fn watch(&self) -> watch::Receiver<Published> {
        self.snapshot.clone()
    }

    /// Wait until the first snapshot is published, up to `deadline`.
    ///
    /// A caller that arrives before the first refresh completes gets either
    /// the snapshot or [`SyncError::FirstLoadTimeout`] within the deadline;
    /// it never hangs.
    pub async fn wait_first_load(
        &self,
        deadline: Duration,
    ) -> Result<Arc<LeaderboardSnapshot>, SyncError> {
        let mut receiver = self.snapshot.clone();
        let first = receiver.wait_for(|published| published.is_some());
        match tokio::time::timeout(deadline, first).await {
            Ok(Ok(published)) => published.as_ref().map(Arc::clone).ok_or(SyncError::WorkerGone),
            Ok(Err(_)) => Err(SyncError::WorkerGone),
            Err(_) => Err(SyncError::FirstLoadTimeout),
        }
    }

    /// Force an immediate recomputation and wait for the pass to complete.
    ///
    /// Used by interactive "entering the leaderboard screen" triggers that
    /// cannot wait for the next timer period. Completion of the pass does
    /// not imply success; read [`LeaderboardHandle::current`] afterwards.
    pub async fn refresh_now(&self) -> Result<(), SyncError> {
        let (ack, done) = oneshot::channel();
        self.commands
            .send(RefreshCommand::Refresh(ack))
            .await
            .map_err(|_| SyncError::WorkerGone)?;
        done.await.map_err(|_| SyncError::WorkerGone)
    }
}
