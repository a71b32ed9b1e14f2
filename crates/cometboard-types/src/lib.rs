//! Shared type definitions for the Cometboard score service.
//!
//! This crate is the single source of truth for the data model used across
//! the Cometboard workspace: difficulty tiers, persisted score records, and
//! the derived leaderboard projections.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrapper for player identities
//! - [`tier`] -- The ordered difficulty tier enumeration
//! - [`records`] -- Persisted [`ScoreRecord`] and derived [`PlayerSummary`]
//! - [`leaderboard`] -- Ranked [`LeaderboardEntry`] and published snapshots

pub mod ids;
pub mod leaderboard;
pub mod records;
pub mod tier;

// Re-export all public types at crate root for convenience.
pub use ids::PlayerId;
pub use leaderboard::{LeaderboardEntry, LeaderboardSnapshot};
pub use records::{PlayerSummary, ScoreRecord};
pub use tier::Tier;
