//! Advantage modes and roll shapes for d20 tests

use serde::{Deserialize, Serialize};

use crate::domain::entities::KeepRule;

/// Advantage state of a d20 test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageMode {
    Disadvantage,
    #[default]
    Normal,
    Advantage,
}

impl AdvantageMode {
    /// Physical d20s fielded for this mode.
    ///
    /// `extra_advantage_die` adds a third die under advantage only
    /// (elven-accuracy style features).
    pub fn dice_count(self, extra_advantage_die: bool) -> u32 {
        match self {
            AdvantageMode::Advantage if extra_advantage_die => 3,
            AdvantageMode::Advantage | AdvantageMode::Disadvantage => 2,
            AdvantageMode::Normal => 1,
        }
    }

    /// Which die of the group counts toward the total.
    pub fn keep_rule(self) -> Option<KeepRule> {
        match self {
            AdvantageMode::Advantage => Some(KeepRule::Highest(1)),
            AdvantageMode::Disadvantage => Some(KeepRule::Lowest(1)),
            AdvantageMode::Normal => None,
        }
    }
}

/// What kind of roll is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollShape {
    #[default]
    AbilityCheck,
    Skill,
    Tool,
    SavingThrow,
    Attack,
    Damage,
    Generic,
}

impl RollShape {
    /// Check-like rolls built around a primary d20.
    pub fn is_d20_test(self) -> bool {
        matches!(
            self,
            RollShape::AbilityCheck
                | RollShape::Skill
                | RollShape::Tool
                | RollShape::SavingThrow
                | RollShape::Attack
        )
    }
}
