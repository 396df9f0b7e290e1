//! Forced-value tag and the single-use evaluation context that carries it

use crate::domain::entities::DiceError;

/// Marker telling a d20 which face its next evaluation must show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForcedValueTag(u8);

impl ForcedValueTag {
    /// `None` for 0, which means "no override".
    pub fn new(value: u8) -> Option<Self> {
        (value != 0).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The forced face for a die with `faces` sides, clamped to `[1, faces]`.
    pub fn clamp_to(self, faces: u32) -> Result<u32, DiceError> {
        if faces == 0 {
            return Err(DiceError::InvalidDieSize(faces));
        }
        Ok(u32::from(self.0).clamp(1, faces))
    }
}

/// Per-call evaluation context for one die term.
///
/// Moved into the evaluation entry point and dropped with it, so a tag can
/// never be replayed by a later evaluation of the same term.
#[derive(Debug, Default)]
pub struct EvaluationContext {
    forced: Option<ForcedValueTag>,
}

impl EvaluationContext {
    pub fn randomized() -> Self {
        Self { forced: None }
    }

    pub fn forced(tag: ForcedValueTag) -> Self {
        Self { forced: Some(tag) }
    }

    pub fn forced_value(&self) -> Option<ForcedValueTag> {
        self.forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_tag() {
        assert!(ForcedValueTag::new(0).is_none());
        assert_eq!(ForcedValueTag::new(20).unwrap().value(), 20);
    }

    #[test]
    fn test_clamp_to_faces() {
        let tag = ForcedValueTag::new(18).unwrap();
        assert_eq!(tag.clamp_to(20).unwrap(), 18);
        assert_eq!(tag.clamp_to(12).unwrap(), 12);
        assert!(matches!(tag.clamp_to(0), Err(DiceError::InvalidDieSize(0))));
    }

    #[test]
    fn test_default_context_is_randomized() {
        assert!(EvaluationContext::default().forced_value().is_none());
        let tag = ForcedValueTag::new(3).unwrap();
        assert_eq!(EvaluationContext::forced(tag).forced_value(), Some(tag));
    }
}
