//! Type-safe identifier wrapper for player identities.
//!
//! A [`PlayerId`] is the stable account identifier for a submitting player.
//! The relational backend keys score rows by this value in its `username`
//! column, so the wrapper holds a string rather than a numeric or UUID id.
//! Wrapping it in a newtype keeps player identifiers from being mixed with
//! display names at compile time.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player (the stable account name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    ///
    /// Empty identifiers are rejected by the store and the intake layer;
    /// this exists so both can validate without allocating.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}
