//! Error types for the score record store.
//!
//! All backend failures are propagated via [`StoreError`], which wraps the
//! underlying [`sqlx`] errors with context about which concern failed.
//! Validation failures are distinguished from backend unavailability so the
//! API layer can map them to 4xx versus 5xx responses.

/// Errors that can occur in the score record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A submission was malformed (empty identity or display name).
    ///
    /// Rejected before any state change; surfaced to callers as a
    /// 4xx-equivalent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The backend could not be reached or gave an unusable answer.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this error is a caller mistake rather than a backend fault.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
