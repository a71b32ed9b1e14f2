//! Behavioral tests for the push and pull sync strategies.
//!
//! The contract under test: the published snapshot reflects acknowledged
//! writes within one refresh interval, a failed store read never clears the
//! previously published snapshot, and the first-load wait resolves or times
//! out instead of hanging.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cometboard_db::{
    MemoryScoreStore, ScoreStore, StoreError, StoreEvent, UpsertOutcome,
};
use cometboard_sync::{PullSync, PushSync, SyncError};
use cometboard_types::{PlayerId, ScoreRecord, Tier};
use tokio::sync::broadcast;

/// Store double whose reads can be switched to fail at runtime.
struct FlakyStore {
    inner: MemoryScoreStore,
    failing: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryScoreStore::new(),
            failing: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(String::from("injected failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for FlakyStore {
    async fn upsert_if_higher(
        &self,
        player_id: &PlayerId,
        display_name: &str,
        difficulty: Tier,
        score: u32,
    ) -> Result<UpsertOutcome, StoreError> {
        self.check()?;
        self.inner
            .upsert_if_higher(player_id, display_name, difficulty, score)
            .await
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        self.check()?;
        self.inner.list_all().await
    }

    async fn get_best(&self, difficulty: Tier) -> Result<Option<ScoreRecord>, StoreError> {
        self.check()?;
        self.inner.get_best(difficulty).await
    }

    fn change_feed(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        self.inner.change_feed()
    }
}

/// Store double that hides the memory store's native change feed, standing
/// in for the relational backend.
struct NoFeedStore(MemoryScoreStore);

#[async_trait]
impl ScoreStore for NoFeedStore {
    async fn upsert_if_higher(
        &self,
        player_id: &PlayerId,
        display_name: &str,
        difficulty: Tier,
        score: u32,
    ) -> Result<UpsertOutcome, StoreError> {
        self.0
            .upsert_if_higher(player_id, display_name, difficulty, score)
            .await
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        self.0.list_all().await
    }

    async fn get_best(&self, difficulty: Tier) -> Result<Option<ScoreRecord>, StoreError> {
        self.0.get_best(difficulty).await
    }
}

async fn seed(store: &dyn ScoreStore) {
    for (player, tier, score) in [
        ("Alice", Tier::Easy, 300_u32),
        ("Bob", Tier::Easy, 450),
        ("Charlie", Tier::Medium, 600),
        ("George", Tier::Infinity, 1200),
        ("Hannah", Tier::Infinity, 1500),
    ] {
        store
            .upsert_if_higher(&PlayerId::new(player.to_lowercase()), player, tier, score)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn pull_first_load_resolves_within_deadline() {
    let store = Arc::new(MemoryScoreStore::new());
    seed(store.as_ref()).await;

    let sync = PullSync::spawn(store, Duration::from_secs(10), 10);
    let handle = sync.handle();

    let snapshot = handle
        .wait_first_load(Duration::from_secs(5))
        .await
        .unwrap();
    let names: Vec<_> = snapshot
        .entries
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(names, ["Hannah", "George", "Charlie", "Bob", "Alice"]);
    assert_eq!(snapshot.revision, 1);

    sync.shutdown().await;
}

#[tokio::test]
async fn pull_forced_refresh_publishes_new_writes_immediately() {
    let store = Arc::new(MemoryScoreStore::new());
    // Long period: only forced refreshes can pick up the write.
    let sync = PullSync::spawn(Arc::clone(&store) as Arc<dyn ScoreStore>, Duration::from_secs(600), 10);
    let handle = sync.handle();
    handle.wait_first_load(Duration::from_secs(5)).await.unwrap();

    store
        .upsert_if_higher(&PlayerId::new("zoe"), "Zoe", Tier::Hard, 42)
        .await
        .unwrap();

    handle.refresh_now().await.unwrap();
    let snapshot = handle.current().unwrap();
    assert_eq!(snapshot.entries.len(), 1);
    assert_eq!(
        snapshot.entries.first().unwrap().player_id,
        PlayerId::new("zoe")
    );

    sync.shutdown().await;
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let store = Arc::new(FlakyStore::new());
    seed(store.as_ref()).await;

    let sync = PullSync::spawn(
        Arc::clone(&store) as Arc<dyn ScoreStore>,
        Duration::from_secs(600),
        10,
    );
    let handle = sync.handle();
    let before = handle.wait_first_load(Duration::from_secs(5)).await.unwrap();

    store.set_failing(true);
    handle.refresh_now().await.unwrap();

    // A concurrent reader still gets the last good snapshot, unchanged.
    let after = handle.current().unwrap();
    assert_eq!(after.revision, before.revision);
    assert_eq!(after.entries, before.entries);

    // And recovery resumes publishing.
    store.set_failing(false);
    handle.refresh_now().await.unwrap();
    assert_eq!(handle.current().unwrap().revision, before.revision + 1);

    sync.shutdown().await;
}

#[tokio::test]
async fn first_load_times_out_when_store_never_answers() {
    let store = Arc::new(FlakyStore::new());
    store.set_failing(true);

    let sync = PullSync::spawn(
        Arc::clone(&store) as Arc<dyn ScoreStore>,
        Duration::from_millis(10),
        10,
    );
    let handle = sync.handle();

    let err = handle
        .wait_first_load(Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::FirstLoadTimeout));
    assert!(handle.current().is_none());

    sync.shutdown().await;
}

#[tokio::test]
async fn push_reflects_writes_without_forced_refresh() {
    let store = Arc::new(MemoryScoreStore::new());
    let sync = PushSync::spawn(Arc::clone(&store) as Arc<dyn ScoreStore>, 10).unwrap();
    let handle = sync.handle();
    handle.wait_first_load(Duration::from_secs(5)).await.unwrap();

    store
        .upsert_if_higher(&PlayerId::new("hannah"), "Hannah", Tier::Infinity, 1500)
        .await
        .unwrap();

    // Wait for the feed-driven recomputation to publish Hannah.
    let mut watcher = handle.watch();
    let published = tokio::time::timeout(
        Duration::from_secs(5),
        watcher.wait_for(|snapshot| {
            snapshot
                .as_ref()
                .is_some_and(|s| !s.entries.is_empty())
        }),
    )
    .await
    .unwrap()
    .unwrap();
    let snapshot = published.as_ref().map(Arc::clone).unwrap();
    drop(published);

    assert_eq!(
        snapshot.entries.first().unwrap().display_name,
        "Hannah"
    );

    sync.shutdown().await;
}

#[tokio::test]
async fn push_requires_a_change_feed() {
    let store = Arc::new(NoFeedStore(MemoryScoreStore::new()));
    let err = PushSync::spawn(store as Arc<dyn ScoreStore>, 10).unwrap_err();
    assert!(matches!(err, SyncError::ChangeFeedUnavailable));
}

#[tokio::test]
async fn shutdown_leaves_no_worker_behind() {
    let store = Arc::new(MemoryScoreStore::new());
    let sync = PullSync::spawn(store, Duration::from_millis(10), 10);
    let handle = sync.handle();
    handle.wait_first_load(Duration::from_secs(5)).await.unwrap();

    sync.shutdown().await;

    // The worker is gone; forced refresh has nobody to talk to.
    let err = handle.refresh_now().await.unwrap_err();
    assert!(matches!(err, SyncError::WorkerGone));
    // The last snapshot stays readable after shutdown.
    assert!(handle.current().is_some());
}

#[tokio::test]
async fn idempotent_resubmission_leaves_leaderboard_unchanged() {
    let store = Arc::new(MemoryScoreStore::new());
    let sync = PullSync::spawn(
        Arc::clone(&store) as Arc<dyn ScoreStore>,
        Duration::from_secs(600),
        10,
    );
    let handle = sync.handle();

    store
        .upsert_if_higher(&PlayerId::new("alice"), "Alice", Tier::Easy, 200)
        .await
        .unwrap();
    handle.refresh_now().await.unwrap();
    let before = handle.current().unwrap();

    // Same submission again: store rejects, board recomputes identically.
    let outcome = store
        .upsert_if_higher(&PlayerId::new("alice"), "Alice", Tier::Easy, 200)
        .await
        .unwrap();
    assert!(!outcome.accepted);
    handle.refresh_now().await.unwrap();
    let after = handle.current().unwrap();

    assert_eq!(before.entries, after.entries);

    sync.shutdown().await;
}
