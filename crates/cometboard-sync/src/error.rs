//! Error types for the sync strategies.

/// Errors surfaced by the sync strategies and the reader handle.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The deadline passed before the first refresh produced a snapshot.
    #[error("timed out waiting for the first leaderboard load")]
    FirstLoadTimeout,

    /// The push strategy was asked to run over a store with no native
    /// change feed.
    #[error("store has no change feed; pair this backend with the pull strategy")]
    ChangeFeedUnavailable,

    /// The background worker has shut down.
    #[error("sync worker has shut down")]
    WorkerGone,
}
