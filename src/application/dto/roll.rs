use serde::Deserialize;

use crate::domain::value_objects::{AdvantageMode, RollShape};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to make a roll
#[derive(Debug, Clone, Deserialize)]
pub struct RollRequestDto {
    #[serde(default)]
    pub shape: RollShape,
    pub formula: String,
    #[serde(default)]
    pub advantage_mode: AdvantageMode,
    #[serde(default)]
    pub extra_advantage_die: bool,
    #[serde(default)]
    pub flavor: Option<String>,
}

impl RollRequestDto {
    pub fn new(shape: RollShape, formula: impl Into<String>) -> Self {
        Self {
            shape,
            formula: formula.into(),
            advantage_mode: AdvantageMode::Normal,
            extra_advantage_die: false,
            flavor: None,
        }
    }

    pub fn with_advantage(mut self, mode: AdvantageMode, extra_die: bool) -> Self {
        self.advantage_mode = mode;
        self.extra_advantage_die = extra_die;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let dto: RollRequestDto = serde_json::from_str(r#"{"formula": "1d20+2"}"#).unwrap();
        assert_eq!(dto.shape, RollShape::AbilityCheck);
        assert_eq!(dto.advantage_mode, AdvantageMode::Normal);
        assert!(!dto.extra_advantage_die);
        assert!(dto.flavor.is_none());
    }

    #[test]
    fn test_full_request() {
        let dto: RollRequestDto = serde_json::from_str(
            r#"{
                "shape": "saving_throw",
                "formula": "d20+4",
                "advantage_mode": "advantage",
                "extra_advantage_die": true,
                "flavor": "Dexterity save"
            }"#,
        )
        .unwrap();
        assert_eq!(dto.shape, RollShape::SavingThrow);
        assert_eq!(dto.advantage_mode, AdvantageMode::Advantage);
        assert!(dto.extra_advantage_die);
        assert_eq!(dto.flavor.as_deref(), Some("Dexterity save"));
    }
}
