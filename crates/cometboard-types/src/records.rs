//! Persisted score records and the derived per-player summary.
//!
//! A [`ScoreRecord`] is the store's unit of truth: at most one record exists
//! per (player, tier) pair and its score only ever increases. A
//! [`PlayerSummary`] is a pure projection built from those records during
//! aggregation; it is never persisted and has no independent lifecycle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::tier::Tier;

/// Best-known score for one (player, difficulty) pair.
///
/// Wire field names (`username`, `timestamp`) match the persisted relational
/// layout and the original JSON contract of `GET /scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// The submitting player's stable identifier.
    #[serde(rename = "username")]
    pub player_id: PlayerId,
    /// The player's display name at the time of the last improvement.
    pub display_name: String,
    /// The difficulty tier this score was attained under.
    pub difficulty: Tier,
    /// The best score ever submitted for this (player, tier) pair.
    pub score: u32,
    /// When the stored score was last improved.
    #[serde(rename = "timestamp")]
    pub recorded_at: DateTime<Utc>,
}

/// Aggregated per-player view over all of that player's score records.
///
/// Tiers the player has not attempted are simply absent from the map and
/// read as zero through [`PlayerSummary::score_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// The player's stable identifier.
    pub player_id: PlayerId,
    /// The player's display name.
    pub display_name: String,
    /// Best score per attempted tier.
    pub scores_by_tier: BTreeMap<Tier, u32>,
}

impl PlayerSummary {
    /// Create an empty summary for a player.
    pub const fn new(player_id: PlayerId, display_name: String) -> Self {
        Self {
            player_id,
            display_name,
            scores_by_tier: BTreeMap::new(),
        }
    }

    /// The player's best score at `tier`, zero if unattempted.
    pub fn score_at(&self, tier: Tier) -> u32 {
        self.scores_by_tier.get(&tier).copied().unwrap_or(0)
    }

    /// Record a score for a tier, keeping the maximum seen so far.
    pub fn record_score(&mut self, tier: Tier, score: u32) {
        let entry = self.scores_by_tier.entry(tier).or_insert(0);
        if score > *entry {
            *entry = score;
        }
    }

    /// The highest tier with a positive score, together with that score.
    ///
    /// A player with no positive score anywhere reports `(Easy, 0)` so the
    /// ranking order stays total.
    pub fn best_tier(&self) -> (Tier, u32) {
        for tier in Tier::ALL.iter().rev() {
            let score = self.score_at(*tier);
            if score > 0 {
                return (*tier, score);
            }
        }
        (Tier::Easy, 0)
    }
}
