//! Roll request entity - an in-flight roll between configuration and evaluation
//!
//! A request is built from a formula, configured for its advantage mode (the
//! primary d20 is resized and given a keep rule), then evaluated term by term
//! against an [`EvaluationPlan`]. It is discarded once it has produced a
//! [`RollResult`].

use std::collections::HashMap;

use chrono::Utc;

use crate::domain::entities::{DiceError, DieTerm, RollResult, TermResult};
use crate::domain::services::{parse_formula, ResultSource};
use crate::domain::value_objects::{
    AdvantageMode, EvaluationContext, ForcedValueTag, RollId, RollShape,
};

/// Index of the primary d20 inside a d20 test.
const PRIMARY_TERM: usize = 0;

/// Bookkeeping that travels with the request but is never shown to players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollOptions {
    forced_value: Option<u8>,
}

impl RollOptions {
    /// Whether the roll was stamped with a forced face.
    pub fn is_forced(&self) -> bool {
        self.forced_value.is_some()
    }

    #[cfg(test)]
    pub fn forced_value(&self) -> Option<u8> {
        self.forced_value
    }
}

/// Per-term evaluation contexts for one evaluation of a request.
///
/// Consumed by [`RollRequest::evaluate`]; every term without an entry is
/// evaluated with a randomized context.
#[derive(Debug, Default)]
pub struct EvaluationPlan {
    contexts: HashMap<usize, EvaluationContext>,
}

impl EvaluationPlan {
    pub fn randomized() -> Self {
        Self::default()
    }

    pub fn force_term(mut self, index: usize, tag: ForcedValueTag) -> Self {
        self.contexts.insert(index, EvaluationContext::forced(tag));
        self
    }

    #[cfg(test)]
    pub fn is_randomized(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Tag planned for a term, if any.
    #[cfg(test)]
    pub fn forced_value(&self, index: usize) -> Option<ForcedValueTag> {
        self.contexts.get(&index).and_then(|ctx| ctx.forced_value())
    }

    fn take(&mut self, index: usize) -> EvaluationContext {
        self.contexts.remove(&index).unwrap_or_default()
    }
}

/// A check, save, attack or free-form roll awaiting evaluation.
#[derive(Debug, Clone)]
pub struct RollRequest {
    pub id: RollId,
    pub shape: RollShape,
    pub advantage_mode: AdvantageMode,
    pub extra_advantage_die: bool,
    pub terms: Vec<DieTerm>,
    pub modifier: i32,
    pub flavor: Option<String>,
    options: RollOptions,
}

impl RollRequest {
    /// Parse `formula` and configure it for `shape` and `advantage_mode`.
    pub fn new(
        shape: RollShape,
        formula: &str,
        advantage_mode: AdvantageMode,
        extra_advantage_die: bool,
    ) -> Result<Self, DiceError> {
        let parsed = parse_formula(formula)?;
        let mut request = Self {
            id: RollId::new(),
            shape,
            advantage_mode,
            extra_advantage_die,
            terms: parsed.terms,
            modifier: parsed.modifier,
            flavor: None,
            options: RollOptions::default(),
        };
        request.configure();
        Ok(request)
    }

    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// A recognized check-like roll: d20 test shape with a d20 first term.
    pub fn is_valid_d20_roll(&self) -> bool {
        self.shape.is_d20_test() && self.terms.first().is_some_and(DieTerm::is_d20)
    }

    /// Index of the primary d20, when this is a recognized d20 test.
    pub fn primary_d20_index(&self) -> Option<usize> {
        self.is_valid_d20_roll().then_some(PRIMARY_TERM)
    }

    pub fn primary_d20(&self) -> Option<&DieTerm> {
        self.primary_d20_index().and_then(|i| self.terms.get(i))
    }

    pub fn primary_d20_mut(&mut self) -> Option<&mut DieTerm> {
        self.primary_d20_index().and_then(|i| self.terms.get_mut(i))
    }

    pub fn options(&self) -> &RollOptions {
        &self.options
    }

    /// Record the forced face in the side-channel options.
    pub fn stamp_forced_value(&mut self, tag: ForcedValueTag) {
        self.options.forced_value = Some(tag.value());
    }

    /// Configured notation, e.g. `2d20kh + 1d4 + 5`.
    pub fn formula(&self) -> String {
        let mut formula = self
            .terms
            .iter()
            .map(DieTerm::formula)
            .collect::<Vec<_>>()
            .join(" + ");
        if self.modifier > 0 {
            formula.push_str(&format!(" + {}", self.modifier));
        } else if self.modifier < 0 {
            formula.push_str(&format!(" - {}", self.modifier.unsigned_abs()));
        }
        formula
    }

    /// Evaluate every term synchronously.
    pub fn evaluate_sync(
        &mut self,
        mut plan: EvaluationPlan,
        random: &dyn ResultSource,
    ) -> RollResult {
        for (index, term) in self.terms.iter_mut().enumerate() {
            term.evaluate_sync(plan.take(index), random);
        }
        self.to_result()
    }

    /// Evaluate every term through the async entry point.
    pub async fn evaluate(
        &mut self,
        mut plan: EvaluationPlan,
        random: &dyn ResultSource,
    ) -> RollResult {
        for (index, term) in self.terms.iter_mut().enumerate() {
            term.evaluate(plan.take(index), random).await;
        }
        self.to_result()
    }

    /// Size and keep rule of the primary d20 for the advantage mode.
    fn configure(&mut self) {
        let mode = self.advantage_mode;
        let count = mode.dice_count(self.extra_advantage_die);
        if let Some(d20) = self.primary_d20_mut() {
            d20.number = count;
            d20.keep = mode.keep_rule();
        }
    }

    fn to_result(&self) -> RollResult {
        let dice_total: i64 = self.terms.iter().map(|t| i64::from(t.total())).sum();
        let total = dice_total + i64::from(self.modifier);

        let natural = self
            .primary_d20()
            .and_then(|d20| d20.kept().first().copied());

        RollResult {
            id: self.id,
            shape: self.shape,
            advantage_mode: self.advantage_mode,
            formula: self.formula(),
            flavor: self.flavor.clone(),
            terms: self.terms.iter().map(TermResult::from_term).collect(),
            modifier: self.modifier,
            total,
            natural_20: natural == Some(20),
            natural_1: natural == Some(1),
            rolled_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::KeepRule;
    use crate::domain::services::MockResultSource;

    fn fixed_source(value: u32) -> MockResultSource {
        let mut source = MockResultSource::new();
        source.expect_draw().returning(move |_| value);
        source
    }

    #[test]
    fn test_configure_advantage() {
        let request =
            RollRequest::new(RollShape::AbilityCheck, "1d20+3", AdvantageMode::Advantage, false)
                .unwrap();
        let d20 = request.primary_d20().unwrap();
        assert_eq!(d20.number, 2);
        assert_eq!(d20.keep, Some(KeepRule::Highest(1)));
        assert_eq!(request.formula(), "2d20kh + 3");
    }

    #[test]
    fn test_configure_extra_advantage_die() {
        let request =
            RollRequest::new(RollShape::Attack, "1d20+5", AdvantageMode::Advantage, true).unwrap();
        assert_eq!(request.primary_d20().unwrap().number, 3);
    }

    #[test]
    fn test_configure_disadvantage() {
        let request =
            RollRequest::new(RollShape::SavingThrow, "d20-1", AdvantageMode::Disadvantage, true)
                .unwrap();
        let d20 = request.primary_d20().unwrap();
        assert_eq!(d20.number, 2);
        assert_eq!(d20.keep, Some(KeepRule::Lowest(1)));
        assert_eq!(request.formula(), "2d20kl - 1");
    }

    #[test]
    fn test_damage_roll_is_not_configured() {
        let request =
            RollRequest::new(RollShape::Damage, "2d6+3", AdvantageMode::Advantage, false).unwrap();
        assert!(!request.is_valid_d20_roll());
        assert!(request.primary_d20().is_none());
        assert_eq!(request.terms[0].number, 2);
        assert_eq!(request.formula(), "2d6 + 3");
    }

    #[test]
    fn test_check_without_leading_d20_is_not_valid() {
        let request =
            RollRequest::new(RollShape::AbilityCheck, "1d6+1d20", AdvantageMode::Normal, false)
                .unwrap();
        assert!(!request.is_valid_d20_roll());
    }

    #[test]
    fn test_evaluate_with_forced_plan() {
        let mut request =
            RollRequest::new(RollShape::Skill, "1d20+1d4+2", AdvantageMode::Normal, false)
                .unwrap();
        let plan = EvaluationPlan::randomized().force_term(0, ForcedValueTag::new(15).unwrap());

        let result = request.evaluate_sync(plan, &fixed_source(3));

        assert_eq!(result.terms[0].results[0].result, 15);
        assert_eq!(result.terms[1].results[0].result, 3);
        assert_eq!(result.total, 15 + 3 + 2);
        assert!(!result.natural_20);
    }

    #[test]
    fn test_natural_flags_follow_kept_die() {
        let mut request =
            RollRequest::new(RollShape::Attack, "1d20", AdvantageMode::Normal, false).unwrap();
        let result = request.evaluate_sync(EvaluationPlan::randomized(), &fixed_source(20));
        assert!(result.natural_20);

        let result = request.evaluate_sync(EvaluationPlan::randomized(), &fixed_source(1));
        assert!(result.natural_1);
    }

    #[test]
    fn test_stamp_is_side_channel_only() {
        let mut request =
            RollRequest::new(RollShape::AbilityCheck, "1d20", AdvantageMode::Normal, false)
                .unwrap();
        request.stamp_forced_value(ForcedValueTag::new(8).unwrap());
        assert_eq!(request.options().forced_value(), Some(8));

        let result = request.evaluate_sync(
            EvaluationPlan::randomized().force_term(0, ForcedValueTag::new(8).unwrap()),
            &fixed_source(1),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("options").is_none());
        assert!(!json.to_string().contains("forced"));
        assert!(request.options().is_forced());
    }

    #[test]
    fn test_total_is_exact_for_large_rolls() {
        let mut request = RollRequest::new(
            RollShape::Damage,
            "100d1000+100d1000+2147483647",
            AdvantageMode::Normal,
            false,
        )
        .unwrap();

        let result = request.evaluate_sync(EvaluationPlan::randomized(), &fixed_source(1000));

        assert_eq!(result.total, 200_000 + i64::from(i32::MAX));
    }
}
