//! Validated submission path into the score store.
//!
//! The intake normalizes untrusted wire input (raw difficulty text, signed
//! score) into the typed store contract, and never mutates state for a
//! submission that is not a strict improvement -- a losing submission is a
//! semantic no-op that still gets a definitive receipt.

use std::sync::Arc;

use cometboard_db::{ScoreStore, StoreError};
use cometboard_types::Tier;

use crate::directory::{AccountDirectory, AccountIdentity};

/// What a submitter learns about the fate of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Whether this submission became the player's new best for the tier.
    pub is_new_best: bool,
    /// The best score stored for the (player, tier) pair after the
    /// submission, whichever side won.
    pub best_score: u32,
}

/// Errors surfaced to submitters.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The submission was malformed and was rejected with no state change.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No identity is signed in to submit on behalf of.
    #[error("no signed-in identity to submit for")]
    NoIdentity,

    /// The store could not process the submission.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Routes validated submissions to the score record store.
#[derive(Clone)]
pub struct ScoreIntake {
    store: Arc<dyn ScoreStore>,
}

impl ScoreIntake {
    /// Create an intake over the given store.
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Normalize raw difficulty text to a recognized tier.
    ///
    /// Missing or unrecognized input falls back to [`Tier::Medium`]. That
    /// default is historical behavior carried forward deliberately, not a
    /// judgment call about what unrecognized input "should" mean.
    pub fn normalize_difficulty(raw: Option<&str>) -> Tier {
        match raw {
            Some(text) => Tier::parse(text).unwrap_or_else(|| {
                tracing::debug!(difficulty = text, "unrecognized difficulty, defaulting to medium");
                Tier::Medium
            }),
            None => Tier::Medium,
        }
    }

    /// Submit a score on behalf of `identity`.
    ///
    /// Rejects negative scores before they reach the store. Delegates the
    /// keep-maximum decision to the store's atomic upsert; when the store
    /// declines (`accepted = false`) the receipt reports the existing best
    /// and no write of any kind has happened.
    ///
    /// # Errors
    ///
    /// [`IntakeError::InvalidInput`] for malformed submissions,
    /// [`IntakeError::Store`] when the backend fails.
    pub async fn submit(
        &self,
        identity: &AccountIdentity,
        difficulty: Option<&str>,
        score: i64,
    ) -> Result<SubmitReceipt, IntakeError> {
        let score = u32::try_from(score)
            .map_err(|_| IntakeError::InvalidInput(format!("score out of range: {score}")))?;
        let tier = Self::normalize_difficulty(difficulty);

        let outcome = self
            .store
            .upsert_if_higher(&identity.id, &identity.display_name, tier, score)
            .await
            .map_err(|e| match e {
                StoreError::InvalidInput(msg) => IntakeError::InvalidInput(msg),
                other => IntakeError::Store(other),
            })?;

        tracing::debug!(
            player = %identity.id,
            tier = %tier,
            score,
            accepted = outcome.accepted,
            "submission processed"
        );

        Ok(SubmitReceipt {
            is_new_best: outcome.accepted,
            best_score: outcome.stored_score,
        })
    }

    /// Submit a score for whoever the directory reports as signed in.
    ///
    /// # Errors
    ///
    /// [`IntakeError::NoIdentity`] when nobody is signed in; otherwise as
    /// [`ScoreIntake::submit`].
    pub async fn submit_current(
        &self,
        directory: &dyn AccountDirectory,
        difficulty: Option<&str>,
        score: i64,
    ) -> Result<SubmitReceipt, IntakeError> {
        let identity = directory.current_identity().ok_or(IntakeError::NoIdentity)?;
        self.submit(&identity, difficulty, score).await
    }
}
