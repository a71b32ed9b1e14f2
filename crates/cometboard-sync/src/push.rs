//! Change-feed-driven sync strategy.
//!
//! Subscribes to the store's native mutation feed and recomputes per
//! notification, so readers see a snapshot that already reflects any
//! acknowledged write. Only the document-style backend supplies a feed;
//! composing this strategy over a feed-less backend is a configuration
//! error caught at spawn time.

use std::sync::Arc;

use cometboard_db::{ScoreStore, StoreEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::SyncError;
use crate::handle::{LeaderboardHandle, RefreshCommand};
use crate::refresh::Refresher;

/// Capacity of the forced-refresh command channel.
const COMMAND_CAPACITY: usize = 8;

/// Push-mode sync strategy: a background task refreshing per store mutation.
#[derive(Debug)]
pub struct PushSync {
    handle: LeaderboardHandle,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl PushSync {
    /// Spawn the refresh worker over the store's change feed.
    ///
    /// An initial refresh runs immediately so readers have a snapshot even
    /// before the first mutation. A lagged feed subscriber coalesces all
    /// missed notifications into a single refresh -- the snapshot is a full
    /// recomputation either way.
    ///
    /// # Errors
    ///
    /// [`SyncError::ChangeFeedUnavailable`] when the backend has no native
    /// feed (pair such backends with [`crate::PullSync`]).
    pub fn spawn(store: Arc<dyn ScoreStore>, limit: usize) -> Result<Self, SyncError> {
        let Some(mut feed) = store.change_feed() else {
            return Err(SyncError::ChangeFeedUnavailable);
        };

        let (mut refresher, snapshot_rx) = Refresher::new(store, limit);
        let (command_tx, mut command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(async move {
            refresher.refresh_once().await;

            loop {
                tokio::select! {
                    event = feed.recv() => match event {
                        Ok(StoreEvent::Updated { revision }) => {
                            tracing::trace!(revision, "store mutation notification");
                            refresher.refresh_once().await;
                        }
                        Err(RecvError::Lagged(missed)) => {
                            tracing::debug!(missed, "change feed lagged; coalescing into one refresh");
                            refresher.refresh_once().await;
                        }
                        Err(RecvError::Closed) => {
                            tracing::debug!("change feed closed; push sync worker stopping");
                            break;
                        }
                    },
                    Some(command) = command_rx.recv() => {
                        let RefreshCommand::Refresh(ack) = command;
                        refresher.refresh_once().await;
                        let _ = ack.send(());
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("push sync worker stopping");
                        break;
                    }
                }
            }
        });

        tracing::info!(limit, "push sync started");

        Ok(Self {
            handle: LeaderboardHandle::new(snapshot_rx, command_tx),
            shutdown,
            worker,
        })
    }

    /// A clonable reader handle onto the published snapshot.
    pub fn handle(&self) -> LeaderboardHandle {
        self.handle.clone()
    }

    /// Unsubscribe from the feed and wait for the worker to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(error) = self.worker.await {
            tracing::warn!(%error, "push sync worker did not exit cleanly");
        }
    }
}
