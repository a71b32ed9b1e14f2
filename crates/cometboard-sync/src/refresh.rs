//! The recompute-and-publish pass shared by both sync strategies.
//!
//! One pass reads a consistent snapshot from the store, runs the pure
//! aggregate and rank transforms, and atomically swaps the published
//! snapshot pointer. No lock is held across the store read; publication is
//! a single [`watch`] send.

use std::sync::Arc;

use cometboard_core::{aggregate, rank};
use cometboard_db::ScoreStore;
use cometboard_types::LeaderboardSnapshot;
use tokio::sync::watch;

/// The value published to readers: `None` until the first successful pass.
pub(crate) type Published = Option<Arc<LeaderboardSnapshot>>;

/// Owns the store reference and the publisher side of the snapshot channel.
pub(crate) struct Refresher {
    store: Arc<dyn ScoreStore>,
    limit: usize,
    publisher: watch::Sender<Published>,
    revision: u64,
}

impl Refresher {
    /// Create a refresher and the receiver its snapshots publish to.
    pub(crate) fn new(
        store: Arc<dyn ScoreStore>,
        limit: usize,
    ) -> (Self, watch::Receiver<Published>) {
        let (publisher, receiver) = watch::channel(None);
        (
            Self {
                store,
                limit,
                publisher,
                revision: 0,
            },
            receiver,
        )
    }

    /// Run one recomputation pass.
    ///
    /// On success the new snapshot replaces the published one wholesale and
    /// `true` is returned. On a store failure the previous snapshot stays
    /// published untouched and `false` is returned; recomputation failures
    /// are never fatal.
    pub(crate) async fn refresh_once(&mut self) -> bool {
        let records = match self.store.list_all().await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "leaderboard refresh failed; keeping previous snapshot");
                return false;
            }
        };

        let summaries = aggregate(&records);
        let entries = rank(&summaries, self.limit);

        self.revision = self.revision.saturating_add(1);
        let snapshot = Arc::new(LeaderboardSnapshot::new(entries, self.revision));
        tracing::debug!(
            revision = snapshot.revision,
            entries = snapshot.entries.len(),
            "published leaderboard snapshot"
        );
        // Send fails only when every reader is gone; nothing to do then.
        let _ = self.publisher.send(Some(snapshot));
        true
    }
}
