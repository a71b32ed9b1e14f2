//! Leaderboard sync strategies for the Cometboard service.
//!
//! Two interchangeable strategies keep the published leaderboard snapshot
//! fresh, both satisfying the same observable contract: the snapshot
//! reflects every write acknowledged before the most recent recomputation,
//! within at most one refresh interval of staleness.
//!
//! - [`PushSync`] subscribes to the store's native change feed and
//!   recomputes per mutation (document-style backend).
//! - [`PullSync`] recomputes on a fixed timer (relational backend).
//!
//! Either way, readers hold a [`LeaderboardHandle`]: a cheap clonable view
//! onto the latest immutable snapshot, swapped atomically on every
//! successful recomputation. A failed recomputation never clears the
//! previously published snapshot -- stale-but-valid data is served over no
//! data.
//!
//! # Modules
//!
//! - [`handle`] -- Reader-side handle over the published snapshot
//! - [`refresh`] -- The recompute-and-publish pass shared by both strategies
//! - [`push`] -- Change-feed driven strategy
//! - [`pull`] -- Timer driven strategy
//! - [`error`] -- Strategy error types

pub mod error;
pub mod handle;
pub mod pull;
pub mod push;
pub mod refresh;

// Re-export primary types for convenience.
pub use error::SyncError;
pub use handle::LeaderboardHandle;
pub use pull::PullSync;
pub use push::PushSync;
