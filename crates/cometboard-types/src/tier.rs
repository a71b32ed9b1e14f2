//! The ordered difficulty tier enumeration.
//!
//! Tiers carry a total order (easy < medium < hard < infinity) that is used
//! both for "best difficulty reached" comparisons and for leaderboard
//! ranking: a score attained at a harder tier always outranks any score at
//! an easier tier.

use serde::{Deserialize, Serialize};

/// A difficulty tier a score can be attained under.
///
/// The derived [`Ord`] follows declaration order, which matches the
/// numeric ranks used by the persisted layout (easy=1 .. infinity=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The entry difficulty.
    Easy,
    /// The default difficulty for submissions that carry none.
    Medium,
    /// The advanced difficulty.
    Hard,
    /// The endless mode; the highest tier.
    Infinity,
}

impl Tier {
    /// All tiers in ascending rank order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Infinity];

    /// Numeric rank of the tier (easy=1 .. infinity=4).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Infinity => 4,
        }
    }

    /// Canonical lowercase name of the tier, as persisted and as carried
    /// on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Infinity => "infinity",
        }
    }

    /// Parse a tier from untrusted text.
    ///
    /// Matching is case-insensitive and tolerant of surrounding whitespace.
    /// Returns `None` for anything that is not one of the four recognized
    /// tiers; callers decide whether that means "reject", "skip the record"
    /// or "fall back to the historical medium default".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "infinity" => Some(Self::Infinity),
            _ => None,
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
