//! Score record store for the Cometboard service.
//!
//! The store is the sole source of truth for best-known scores: one row per
//! (player, difficulty) pair, mutated only when a new submission strictly
//! beats the stored score. Two interchangeable backends satisfy the same
//! [`ScoreStore`] contract:
//!
//! - [`MemoryScoreStore`] -- document-style in-process map with a native
//!   change feed, suitable for the push-driven sync strategy and for tests.
//! - [`PostgresScoreStore`] -- relational backend with a unique constraint
//!   on (username, difficulty) and a single-statement "insert or update if
//!   greater" upsert, driven by the pull-driven sync strategy.
//!
//! Backends are selected at composition time; nothing downstream inspects
//! which one it is talking to.
//!
//! # Modules
//!
//! - [`store`] -- The [`ScoreStore`] trait and its operation results
//! - [`memory`] -- In-memory document backend
//! - [`postgres`] -- `PostgreSQL` backend (pool, migrations, queries)
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use memory::MemoryScoreStore;
pub use postgres::{PostgresScoreStore, PostgresStoreConfig};
pub use store::{ScoreStore, StoreEvent, UpsertOutcome};
