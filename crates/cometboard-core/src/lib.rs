//! Aggregation, ranking, and score intake for the Cometboard service.
//!
//! The two pure transforms at the heart of the leaderboard live here:
//! [`aggregate::aggregate`] folds raw score records into per-player
//! summaries, and [`rank::rank`] total-orders those summaries into the
//! leaderboard. Neither owns any state; both are deterministic over a
//! snapshot read of the store.
//!
//! # Modules
//!
//! - [`aggregate`] -- Per-player summary projection over score records
//! - [`rank`] -- Tier-then-score leaderboard ordering with top-N truncation
//! - [`intake`] -- Validated submission path into the score store
//! - [`directory`] -- Account directory seam for resolving submitter identity
//! - [`config`] -- Typed YAML configuration for the whole service

pub mod aggregate;
pub mod config;
pub mod directory;
pub mod intake;
pub mod rank;

// Re-export primary types for convenience.
pub use aggregate::aggregate;
pub use config::{
    ConfigError, ScoreboardConfig, ServerConfig, StoreBackend, StoreConfig, SyncConfig, SyncMode,
};
pub use directory::{AccountDirectory, AccountIdentity, StaticDirectory};
pub use intake::{IntakeError, ScoreIntake, SubmitReceipt};
pub use rank::{rank, DEFAULT_LIMIT};
