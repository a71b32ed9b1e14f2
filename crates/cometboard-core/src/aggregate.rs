//! Per-player summary projection over score records.
//!
//! Aggregation is a pure function: the same input multiset always produces
//! the same output, regardless of record order. Grouping goes through a
//! `BTreeMap` keyed by player id, so the output comes back in player-id
//! order -- which is also the order the ranker's stable sort falls back to
//! on full ties.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use cometboard_types::{PlayerId, PlayerSummary, ScoreRecord};

/// Group score records by player and keep each player's best score per tier.
///
/// The store already guarantees at most one record per (player, tier); when
/// fed duplicates anyway -- replayed legacy data, merged exports -- the
/// maximum per tier wins, so the projection stays correct.
///
/// Display names can drift between a player's records; the name from the
/// most recently written record is used so the result does not depend on
/// input order.
pub fn aggregate(records: &[ScoreRecord]) -> Vec<PlayerSummary> {
    let mut grouped: BTreeMap<&PlayerId, (PlayerSummary, DateTime<Utc>)> = BTreeMap::new();

    for record in records {
        match grouped.get_mut(&record.player_id) {
            Some((summary, name_stamp)) => {
                summary.record_score(record.difficulty, record.score);
                if record.recorded_at > *name_stamp {
                    summary.display_name = record.display_name.clone();
                    *name_stamp = record.recorded_at;
                }
            }
            None => {
                let mut summary =
                    PlayerSummary::new(record.player_id.clone(), record.display_name.clone());
                summary.record_score(record.difficulty, record.score);
                grouped.insert(&record.player_id, (summary, record.recorded_at));
            }
        }
    }

    grouped.into_values().map(|(summary, _)| summary).collect()
}
