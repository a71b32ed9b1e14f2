//! Ranked leaderboard entries and the published snapshot.
//!
//! A snapshot is immutable once built: the sync strategy constructs a fresh
//! one on every recomputation and swaps it in wholesale. Readers never see a
//! partially built leaderboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::tier::Tier;

/// One row of the computed leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Position on the board, starting at 1.
    pub rank: u32,
    /// The player's stable identifier.
    pub player_id: PlayerId,
    /// The player's display name.
    pub display_name: String,
    /// The highest tier at which the player has a positive score.
    pub best_tier: Tier,
    /// The player's score at that tier.
    pub best_tier_score: u32,
}

/// A fully computed leaderboard, published for readers.
///
/// Replaced wholesale on each recomputation; `revision` increases by one per
/// successful refresh so staleness is observable in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    /// Ordered entries, best player first.
    pub entries: Vec<LeaderboardEntry>,
    /// Monotonic refresh counter, starting at 1 for the first snapshot.
    pub revision: u64,
    /// When this snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

impl LeaderboardSnapshot {
    /// Build a snapshot from ranked entries.
    pub fn new(entries: Vec<LeaderboardEntry>, revision: u64) -> Self {
        Self {
            entries,
            revision,
            computed_at: Utc::now(),
        }
    }
}
