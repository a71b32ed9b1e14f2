//! In-memory document-style score store.
//!
//! Records live in a single map keyed by (player, tier), guarded by one
//! [`RwLock`]. Serializing all writers through the map-level write lock is
//! what gives `upsert_if_higher` its per-key atomicity, and holding the read
//! lock for the duration of `list_all` is what makes reads a consistent
//! snapshot. Lock scope never spans any await on external I/O because there
//! is none.
//!
//! This backend carries a native change feed (a [`broadcast`] channel), so
//! it is the one the push-driven sync strategy composes with. It doubles as
//! the test double for every crate downstream of the store seam.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use cometboard_types::{PlayerId, ScoreRecord, Tier};
use tokio::sync::{broadcast, RwLock};

use crate::error::StoreError;
use crate::store::{validate_identity, ScoreStore, StoreEvent, UpsertOutcome};

/// Capacity of the change feed.
///
/// A subscriber that falls behind by more than this many events receives a
/// [`broadcast::error::RecvError::Lagged`] and is expected to coalesce the
/// missed notifications into one refresh.
const CHANGE_FEED_CAPACITY: usize = 64;

/// Document-style in-memory implementation of [`ScoreStore`].
pub struct MemoryScoreStore {
    records: RwLock<BTreeMap<(PlayerId, Tier), ScoreRecord>>,
    changes: broadcast::Sender<StoreEvent>,
    revision: AtomicU64,
}

impl MemoryScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            records: RwLock::new(BTreeMap::new()),
            changes,
            revision: AtomicU64::new(0),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn upsert_if_higher(
        &self,
        player_id: &PlayerId,
        display_name: &str,
        difficulty: Tier,
        score: u32,
    ) -> Result<UpsertOutcome, StoreError> {
        validate_identity(player_id, display_name)?;

        let outcome = {
            let mut records = self.records.write().await;
            let key = (player_id.clone(), difficulty);
            match records.get_mut(&key) {
                Some(existing) if existing.score >= score => UpsertOutcome {
                    accepted: false,
                    stored_score: existing.score,
                },
                Some(existing) => {
                    existing.score = score;
                    existing.display_name = display_name.to_owned();
                    existing.recorded_at = Utc::now();
                    UpsertOutcome {
                        accepted: true,
                        stored_score: score,
                    }
                }
                None => {
                    records.insert(
                        key,
                        ScoreRecord {
                            player_id: player_id.clone(),
                            display_name: display_name.to_owned(),
                            difficulty,
                            score,
                            recorded_at: Utc::now(),
                        },
                    );
                    UpsertOutcome {
                        accepted: true,
                        stored_score: score,
                    }
                }
            }
        };

        if outcome.accepted {
            let revision = self.revision.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
            // No receivers is fine; the feed is optional to consume.
            let _ = self.changes.send(StoreEvent::Updated { revision });
            tracing::debug!(
                player = %player_id,
                tier = %difficulty,
                score,
                revision,
                "score record improved"
            );
        }

        Ok(outcome)
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn get_best(&self, difficulty: Tier) -> Result<Option<ScoreRecord>, StoreError> {
        let records = self.records.read().await;
        let mut best: Option<&ScoreRecord> = None;
        for record in records.values() {
            if record.difficulty != difficulty {
                continue;
            }
            // Strict comparison keeps the first-seen record on ties.
            if best.is_none_or(|b| record.score > b.score) {
                best = Some(record);
            }
        }
        Ok(best.cloned())
    }

    fn change_feed(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        Some(self.changes.subscribe())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alice() -> PlayerId {
        PlayerId::new("alice")
    }

    #[tokio::test]
    async fn first_submission_creates_record() {
        let store = MemoryScoreStore::new();
        let outcome = store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 300)
            .await
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.stored_score, 300);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn lower_submission_is_rejected_with_stored_best() {
        let store = MemoryScoreStore::new();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 200)
            .await
            .unwrap();

        let outcome = store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 150)
            .await
            .unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stored_score, 200);

        let best = store.get_best(Tier::Easy).await.unwrap().unwrap();
        assert_eq!(best.score, 200);
    }

    #[tokio::test]
    async fn equal_submission_is_not_an_improvement() {
        let store = MemoryScoreStore::new();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Hard, 500)
            .await
            .unwrap();
        let outcome = store
            .upsert_if_higher(&alice(), "Alice", Tier::Hard, 500)
            .await
            .unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stored_score, 500);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn one_record_per_player_and_tier() {
        let store = MemoryScoreStore::new();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 100)
            .await
            .unwrap();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Hard, 50)
            .await
            .unwrap();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 120)
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        let all = store.list_all().await.unwrap();
        let easy = all.iter().find(|r| r.difficulty == Tier::Easy).unwrap();
        assert_eq!(easy.score, 120);
    }

    #[tokio::test]
    async fn empty_identity_is_rejected() {
        let store = MemoryScoreStore::new();
        let err = store
            .upsert_if_higher(&PlayerId::new(""), "Alice", Tier::Easy, 10)
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());

        let err = store
            .upsert_if_higher(&alice(), "", Tier::Easy, 10)
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn change_feed_fires_only_on_improvement() {
        let store = MemoryScoreStore::new();
        let mut feed = store.change_feed().unwrap();

        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 100)
            .await
            .unwrap();
        assert!(matches!(
            feed.try_recv().unwrap(),
            StoreEvent::Updated { revision: 1 }
        ));

        // Rejected submission must not notify.
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 50)
            .await
            .unwrap();
        assert!(feed.try_recv().is_err());
    }

    #[tokio::test]
    async fn get_best_ignores_other_tiers() {
        let store = MemoryScoreStore::new();
        store
            .upsert_if_higher(&alice(), "Alice", Tier::Easy, 900)
            .await
            .unwrap();
        store
            .upsert_if_higher(&PlayerId::new("bob"), "Bob", Tier::Hard, 10)
            .await
            .unwrap();

        let best = store.get_best(Tier::Hard).await.unwrap().unwrap();
        assert_eq!(best.player_id, PlayerId::new("bob"));
        assert!(store.get_best(Tier::Infinity).await.unwrap().is_none());
    }
}
