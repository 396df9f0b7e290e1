//! Roll result - what players see once a roll is evaluated

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{DieOutcome, DieTerm};
use crate::domain::value_objects::{AdvantageMode, RollId, RollShape};

/// Evaluated faces of one die term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermResult {
    pub formula: String,
    pub faces: u32,
    pub results: Vec<DieOutcome>,
    pub subtotal: u32,
}

impl TermResult {
    pub fn from_term(term: &DieTerm) -> Self {
        Self {
            formula: term.formula(),
            faces: term.faces,
            results: term.results().to_vec(),
            subtotal: term.total(),
        }
    }
}

/// Complete result of a roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollResult {
    pub id: RollId,
    pub shape: RollShape,
    pub advantage_mode: AdvantageMode,
    pub formula: String,
    pub flavor: Option<String>,
    pub terms: Vec<TermResult>,
    pub modifier: i32,
    pub total: i64,
    pub natural_20: bool,
    pub natural_1: bool,
    pub rolled_at: DateTime<Utc>,
}

impl RollResult {
    /// Individual dice for display; discarded dice are parenthesized.
    pub fn dice_display(&self) -> String {
        let dice = self
            .terms
            .iter()
            .map(|term| {
                let shown = term
                    .results
                    .iter()
                    .map(|r| {
                        if r.active {
                            r.result.to_string()
                        } else {
                            format!("({})", r.result)
                        }
                    })
                    .collect::<Vec<_>>();
                format!("[{}]", shown.join(", "))
            })
            .collect::<Vec<_>>()
            .join(" + ");

        match self.modifier {
            0 => dice,
            m if m > 0 => format!("{} + {}", dice, m),
            m => format!("{} - {}", dice, m.unsigned_abs()),
        }
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.dice_display(), self.total)
    }
}
