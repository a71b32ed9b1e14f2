//! The [`ScoreStore`] trait: the single seam between the ranking engine and
//! whichever backend holds the score rows.
//!
//! All mutation goes through [`ScoreStore::upsert_if_higher`]; no caller may
//! read-then-write a record outside it, which is what rules out lost updates
//! when two submissions for the same (player, difficulty) race.

use async_trait::async_trait;
use cometboard_types::{PlayerId, ScoreRecord, Tier};
use tokio::sync::broadcast;

use crate::error::StoreError;

/// Result of an upsert attempt.
///
/// A submission that loses the race (or simply fails to beat the stored
/// best) still gets a definitive answer carrying the value that won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Whether the submitted score became the new stored best.
    pub accepted: bool,
    /// The score stored after the operation (the maximum of old and new).
    pub stored_score: u32,
}

/// Change notification emitted by backends that support a native feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A score row was inserted or improved.
    Updated {
        /// Monotonic mutation counter of the emitting store.
        revision: u64,
    },
}

/// Durable table of best-known score per (player, difficulty).
///
/// # Contract
///
/// - `upsert_if_higher` is atomic per (player, difficulty) key: under any
///   interleaving of concurrent submissions the final stored score is the
///   maximum of all submitted scores.
/// - `list_all` and `get_best` observe a consistent snapshot; a record is
///   visible fully or not at all, never with partial fields.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Insert the record, or overwrite its score and timestamp only when
    /// `score` strictly exceeds the stored value.
    ///
    /// Rejects with [`StoreError::InvalidInput`] when `player_id` or
    /// `display_name` is empty.
    async fn upsert_if_higher(
        &self,
        player_id: &PlayerId,
        display_name: &str,
        difficulty: Tier,
        score: u32,
    ) -> Result<UpsertOutcome, StoreError>;

    /// All stored records, in no particular order.
    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError>;

    /// The highest-scoring record for one difficulty, if any exists.
    async fn get_best(&self, difficulty: Tier) -> Result<Option<ScoreRecord>, StoreError>;

    /// Subscribe to mutation notifications, when the backend has a native
    /// feed.
    ///
    /// The document-style backend returns `Some`; the relational backend
    /// returns `None` and relies on the pull strategy's timer to drive the
    /// same downstream interface.
    fn change_feed(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        None
    }
}

/// Validate the identity fields shared by every backend.
pub(crate) fn validate_identity(player_id: &PlayerId, display_name: &str) -> Result<(), StoreError> {
    if player_id.is_empty() {
        return Err(StoreError::InvalidInput(String::from(
            "player id must not be empty",
        )));
    }
    if display_name.is_empty() {
        return Err(StoreError::InvalidInput(String::from(
            "display name must not be empty",
        )));
    }
    Ok(())
}
