//! Account directory seam for resolving the submitting identity.
//!
//! The core does not implement authentication. Whatever system does --
//! session cookies, an external identity provider, a fixed service account
//! -- is modeled as an [`AccountDirectory`] that can answer "who is
//! submitting right now". The intake layer stamps submissions with the
//! resolved identity and refuses to submit when there is none.

use cometboard_types::PlayerId;

/// A resolved submitting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    /// The player's stable identifier.
    pub id: PlayerId,
    /// The name shown on the leaderboard.
    pub display_name: String,
}

impl AccountIdentity {
    /// Create an identity from an id and display name.
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Resolves the identity on whose behalf a submission is made.
pub trait AccountDirectory: Send + Sync {
    /// The currently signed-in identity, or `None` when nobody is.
    fn current_identity(&self) -> Option<AccountIdentity>;
}

/// A directory with a fixed answer.
///
/// Used by the composition root when identity arrives with the request
/// itself, and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    identity: Option<AccountIdentity>,
}

impl StaticDirectory {
    /// A directory that always reports `identity` as signed in.
    pub fn signed_in(identity: AccountIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// A directory with nobody signed in.
    pub const fn guest() -> Self {
        Self { identity: None }
    }
}

impl AccountDirectory for StaticDirectory {
    fn current_identity(&self) -> Option<AccountIdentity> {
        self.identity.clone()
    }
}
