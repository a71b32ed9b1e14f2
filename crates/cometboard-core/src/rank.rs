//! Tier-then-score leaderboard ordering with top-N truncation.
//!
//! The one genuinely subtle rule of the system: players are ranked by
//! *achievement tier first*, raw score second. A modest score at a harder
//! tier always outranks a huge score at an easier one -- 10 points on
//! infinity beats 9000 points on easy.

use cometboard_types::{LeaderboardEntry, PlayerSummary};

/// Default number of leaderboard entries kept after ranking.
pub const DEFAULT_LIMIT: usize = 10;

/// Order player summaries into a leaderboard, keeping at most `limit`
/// entries.
///
/// Sort keys, in order:
/// 1. best tier (highest tier with a positive score), descending;
/// 2. the player's score at that tier, descending.
///
/// Ties beyond those two keys are resolved by the stable sort preserving
/// input order; [`aggregate`](crate::aggregate::aggregate) hands summaries
/// over in player-id order, so fully tied players appear in id order.
/// Players with no positive score anywhere rank as (easy, 0) at the bottom.
pub fn rank(summaries: &[PlayerSummary], limit: usize) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<_> = summaries
        .iter()
        .map(|summary| {
            let (best_tier, best_tier_score) = summary.best_tier();
            (summary, best_tier, best_tier_score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (summary, best_tier, best_tier_score))| LeaderboardEntry {
            rank: u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1),
            player_id: summary.player_id.clone(),
            display_name: summary.display_name.clone(),
            best_tier,
            best_tier_score,
        })
        .collect()
}
