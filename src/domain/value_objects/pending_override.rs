//! Pending d20 override value object
//!
//! The game master may pre-select the face the next d20 check shows. Only one
//! value can be pending at a time and `0` means nothing is pending.

use serde::{Deserialize, Serialize};

use super::ForcedValueTag;

/// Highest face a pending override may name.
pub const MAX_OVERRIDE_FACE: u8 = 20;

/// Value outside `{0} ∪ [1, 20]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Override value {0} is outside 0..=20")]
pub struct OverrideOutOfRange(pub i64);

/// The next d20 face chosen by the game master, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PendingOverride(u8);

impl PendingOverride {
    pub const NONE: Self = Self(0);

    /// Strict constructor used when reading persisted values.
    pub fn new(value: i64) -> Result<Self, OverrideOutOfRange> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_OVERRIDE_FACE => Ok(Self(v)),
            _ => Err(OverrideOutOfRange(value)),
        }
    }

    /// Lenient constructor: anything outside `[1, 20]` clears the override.
    pub fn clamped(value: i64) -> Self {
        Self::new(value).unwrap_or(Self::NONE)
    }

    /// Interpret a number typed into the prompt.
    ///
    /// Values inside `[1, 20]` are floored to a whole face; non-finite or
    /// out-of-range input clears the override.
    pub fn from_input(raw: f64) -> Self {
        if raw.is_finite() && (1.0..=f64::from(MAX_OVERRIDE_FACE)).contains(&raw) {
            Self(raw.floor() as u8)
        } else {
            Self::NONE
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pending(self) -> bool {
        self.0 != 0
    }

    /// The tag a d20 carries into evaluation when this override is applied.
    pub fn forced_tag(self) -> Option<ForcedValueTag> {
        ForcedValueTag::new(self.0)
    }
}

impl TryFrom<i64> for PendingOverride {
    type Error = OverrideOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PendingOverride> for i64 {
    fn from(value: PendingOverride) -> i64 {
        i64::from(value.0)
    }
}

impl std::fmt::Display for PendingOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
