//! Timer-driven sync strategy.
//!
//! Recomputes the leaderboard on a fixed period. Readers may observe a
//! snapshot up to one period stale; an immediate refresh can be forced
//! through the handle. The worker performs its first refresh on spawn so
//! the first load does not wait a full period.

use std::sync::Arc;
use std::time::Duration;

use cometboard_db::ScoreStore;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::handle::{LeaderboardHandle, RefreshCommand};
use crate::refresh::Refresher;

/// Capacity of the forced-refresh command channel.
const COMMAND_CAPACITY: usize = 8;

/// Pull-mode sync strategy: a background task refreshing on an interval.
pub struct PullSync {
    handle: LeaderboardHandle,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl PullSync {
    /// Spawn the refresh worker.
    ///
    /// The first refresh runs immediately; afterwards one pass runs every
    /// `period`, plus one per forced-refresh command. Missed ticks (a slow
    /// store) are skipped rather than bunched.
    pub fn spawn(store: Arc<dyn ScoreStore>, period: Duration, limit: usize) -> Self {
        let (mut refresher, snapshot_rx) = Refresher::new(store, limit);
        let (command_tx, mut command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        refresher.refresh_once().await;
                    }
                    Some(command) = command_rx.recv() => {
                        let RefreshCommand::Refresh(ack) = command;
                        refresher.refresh_once().await;
                        let _ = ack.send(());
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("pull sync worker stopping");
                        break;
                    }
                }
            }
        });

        tracing::info!(period_secs = period.as_secs_f64(), limit, "pull sync started");

        Self {
            handle: LeaderboardHandle::new(snapshot_rx, command_tx),
            shutdown,
            worker,
        }
    }

    /// A clonable reader handle onto the published snapshot.
    pub fn handle(&self) -> LeaderboardHandle {
        self.handle.clone()
    }

    /// Stop the periodic timer and wait for the worker to exit.
    ///
    /// After this returns no background work remains; pending forced
    /// refreshes are answered by their ack channel being dropped.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(error) = self.worker.await {
            tracing::warn!(%error, "pull sync worker did not exit cleanly");
        }
    }
}
