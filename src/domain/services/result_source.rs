//! Result sources - where a die's faces come from
//!
//! A die never talks to a random generator directly. Each draw goes through a
//! [`ResultSource`], either the randomized one injected from infrastructure or
//! a [`ForcedSource`] built from a forced-value tag for a single evaluation.

use crate::domain::entities::DiceError;
use crate::domain::value_objects::ForcedValueTag;

/// Produces one face for a die with `faces` sides.
#[cfg_attr(test, mockall::automock)]
pub trait ResultSource: Send + Sync {
    fn draw(&self, faces: u32) -> u32;
}

/// Always yields the same, already clamped face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedSource {
    value: u32,
}

impl ForcedSource {
    /// Build the source for a die with `faces` sides.
    pub fn for_die(tag: ForcedValueTag, faces: u32) -> Result<Self, DiceError> {
        Ok(Self {
            value: tag.clamp_to(faces)?,
        })
    }
}

impl ResultSource for ForcedSource {
    fn draw(&self, _faces: u32) -> u32 {
        self.value
    }
}
