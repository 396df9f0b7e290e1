//! Domain entities - Dice and the rolls built from them

mod die_term;
mod roll_request;
mod roll_result;

pub use die_term::{
    DiceError, DieOutcome, DieTerm, KeepRule, MAX_DICE_PER_TERM, MAX_DIE_FACES, MAX_TERMS,
};
pub use roll_request::{EvaluationPlan, RollRequest};
pub use roll_result::{RollResult, TermResult};
