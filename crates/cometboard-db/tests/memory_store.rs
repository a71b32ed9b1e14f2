//! Concurrency properties of the in-memory score store.
//!
//! The contract under test: for any interleaving of concurrent submissions
//! to the same (player, difficulty) key, the stored score converges to the
//! maximum submitted value and no submitter is left without a definitive
//! answer.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use cometboard_db::{MemoryScoreStore, ScoreStore};
use cometboard_types::{PlayerId, Tier};

#[tokio::test]
async fn racing_submissions_converge_to_maximum() {
    let store = Arc::new(MemoryScoreStore::new());
    let player = PlayerId::new("alice");

    let mut handles = Vec::new();
    for score in [120_u32, 45, 300, 7, 299, 300, 150, 0, 288] {
        let store = Arc::clone(&store);
        let player = player.clone();
        handles.push(tokio::spawn(async move {
            store
                .upsert_if_higher(&player, "Alice", Tier::Infinity, score)
                .await
        }));
    }

    let mut accepted_scores = Vec::new();
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        if outcome.accepted {
            accepted_scores.push(outcome.stored_score);
        }
    }

    // Whatever the interleaving, 300 must have been accepted at some point
    // and must be what remains stored.
    assert!(accepted_scores.contains(&300));
    let best = store.get_best(Tier::Infinity).await.unwrap().unwrap();
    assert_eq!(best.score, 300);

    // Exactly one record exists for the key.
    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn losing_submission_sees_the_winning_value() {
    let store = MemoryScoreStore::new();
    let player = PlayerId::new("bob");

    store
        .upsert_if_higher(&player, "Bob", Tier::Hard, 1000)
        .await
        .unwrap();

    let outcome = store
        .upsert_if_higher(&player, "Bob", Tier::Hard, 400)
        .await
        .unwrap();
    assert!(!outcome.accepted);
    assert_eq!(outcome.stored_score, 1000);
}

#[tokio::test]
async fn concurrent_readers_never_see_partial_state() {
    let store = Arc::new(MemoryScoreStore::new());

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 1..=50_u32 {
                let player = PlayerId::new(format!("player-{i}"));
                store
                    .upsert_if_higher(&player, "Player", Tier::Medium, i)
                    .await
                    .unwrap();
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..50 {
                let records = store.list_all().await.unwrap();
                // Every visible record is fully formed.
                for record in records {
                    assert!(!record.player_id.is_empty());
                    assert!(!record.display_name.is_empty());
                }
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(store.list_all().await.unwrap().len(), 50);
}
