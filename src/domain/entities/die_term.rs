//! Die term entity - one group of identical dice inside a roll
//!
//! A term is evaluated through one of three entry points:
//!
//! - [`DieTerm::evaluate_sync`] for the synchronous pipeline
//! - [`DieTerm::evaluate`] for the async pipeline
//! - [`DieTerm::roll_once`] for a raw single-face draw
//!
//! All three take an [`EvaluationContext`]. When the context carries a forced
//! value and the term is a d20, every path yields the same clamped face and
//! the random source is never consulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::services::{ForcedSource, ResultSource};
use crate::domain::value_objects::{EvaluationContext, ForcedValueTag};

/// Faces of the die that d20 tests are built around.
pub const D20_FACES: u32 = 20;

/// Upper bound on dice in a single term.
pub const MAX_DICE_PER_TERM: u32 = 100;

/// Largest die the parser accepts.
pub const MAX_DIE_FACES: u32 = 1000;

/// Upper bound on die terms in one formula.
pub const MAX_TERMS: usize = 20;

/// Error type for dice parsing and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
    #[error("Too many dice in one term: {0} (max {max})", max = MAX_DICE_PER_TERM)]
    TooManyDice(u32),
    #[error("Too many die terms in one formula (max {0})")]
    TooManyTerms(usize),
    #[error("Cannot keep {keep} dice when only rolling {count} (in {notation})")]
    InvalidKeepCount {
        keep: u32,
        count: u32,
        notation: String,
    },
}

/// Which dice of a group count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "count")]
pub enum KeepRule {
    Highest(u32),
    Lowest(u32),
}

impl KeepRule {
    pub fn count(self) -> u32 {
        match self {
            KeepRule::Highest(n) | KeepRule::Lowest(n) => n,
        }
    }
}

/// One physical die's face and whether it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieOutcome {
    pub result: u32,
    pub active: bool,
}

impl DieOutcome {
    pub fn active(result: u32) -> Self {
        Self {
            result,
            active: true,
        }
    }
}

/// A group of `number` dice with `faces` sides each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DieTerm {
    pub number: u32,
    pub faces: u32,
    pub keep: Option<KeepRule>,
    results: Vec<DieOutcome>,
    evaluated: bool,
}

/// Where this evaluation's faces come from.
enum SelectedSource<'a> {
    Forced(ForcedSource),
    Randomized(&'a dyn ResultSource),
}

impl SelectedSource<'_> {
    fn draw(&self, faces: u32) -> u32 {
        match self {
            SelectedSource::Forced(source) => source.draw(faces),
            SelectedSource::Randomized(source) => source.draw(faces),
        }
    }
}

impl DieTerm {
    pub fn new(number: u32, faces: u32) -> Self {
        Self {
            number,
            faces,
            keep: None,
            results: Vec::new(),
            evaluated: false,
        }
    }

    pub fn d20() -> Self {
        Self::new(1, D20_FACES)
    }

    pub fn with_keep(mut self, keep: KeepRule) -> Self {
        self.keep = Some(keep);
        self
    }

    /// Only d20 terms honor forced values.
    pub fn is_d20(&self) -> bool {
        self.faces == D20_FACES
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    pub fn results(&self) -> &[DieOutcome] {
        &self.results
    }

    /// Faces of the kept dice, in roll order.
    pub fn kept(&self) -> Vec<u32> {
        self.results
            .iter()
            .filter(|r| r.active)
            .map(|r| r.result)
            .collect()
    }

    /// Sum of the kept dice.
    pub fn total(&self) -> u32 {
        self.kept().iter().sum()
    }

    /// Notation for this term, e.g. `2d20kh` or `4d6kh3`.
    pub fn formula(&self) -> String {
        let keep = match self.keep {
            Some(KeepRule::Highest(1)) => "kh".to_string(),
            Some(KeepRule::Lowest(1)) => "kl".to_string(),
            Some(KeepRule::Highest(n)) => format!("kh{n}"),
            Some(KeepRule::Lowest(n)) => format!("kl{n}"),
            None => String::new(),
        };
        format!("{}d{}{}", self.number, self.faces, keep)
    }

    /// Draw a single face.
    ///
    /// A forced d20 short-circuits to the clamped value; `random` is not
    /// touched.
    pub fn roll_once(&self, ctx: &EvaluationContext, random: &dyn ResultSource) -> u32 {
        self.select_source(ctx, random).draw(self.faces)
    }

    /// Evaluate every die of the term synchronously.
    pub fn evaluate_sync(
        &mut self,
        ctx: EvaluationContext,
        random: &dyn ResultSource,
    ) -> &[DieOutcome] {
        let ctx = self.prepare(ctx);
        self.run_evaluation(&ctx, random);
        &self.results
    }

    /// Evaluate every die of the term from the async roll pipeline.
    pub async fn evaluate(
        &mut self,
        ctx: EvaluationContext,
        random: &dyn ResultSource,
    ) -> &[DieOutcome] {
        let ctx = self.prepare(ctx);
        // Suspension point between configuration and the draw
        tokio::task::yield_now().await;
        self.run_evaluation(&ctx, random);
        &self.results
    }

    fn select_source<'a>(
        &self,
        ctx: &EvaluationContext,
        random: &'a dyn ResultSource,
    ) -> SelectedSource<'a> {
        match ctx.forced_value() {
            Some(tag) if self.is_d20() => match ForcedSource::for_die(tag, self.faces) {
                Ok(source) => SelectedSource::Forced(source),
                Err(_) => SelectedSource::Randomized(random),
            },
            _ => SelectedSource::Randomized(random),
        }
    }

    /// Reset prior results and, for a forced d20, pre-fill the outcome array.
    ///
    /// Returns the context the rest of the evaluation runs with. A failed
    /// synthesis downgrades it to a randomized context.
    fn prepare(&mut self, ctx: EvaluationContext) -> EvaluationContext {
        self.results.clear();
        self.evaluated = false;

        let Some(tag) = ctx.forced_value() else {
            return ctx;
        };
        if !self.is_d20() {
            return EvaluationContext::randomized();
        }

        match self.synthesize(tag) {
            Ok(()) => ctx,
            Err(e) => {
                tracing::warn!("Forced d20 evaluation failed, rolling normally: {}", e);
                self.results.clear();
                EvaluationContext::randomized()
            }
        }
    }

    fn synthesize(&mut self, tag: ForcedValueTag) -> Result<(), DiceError> {
        if self.number == 0 {
            return Err(DiceError::NoDice);
        }
        let source = ForcedSource::for_die(tag, self.faces)?;
        self.results = (0..self.number)
            .map(|_| DieOutcome::active(source.draw(self.faces)))
            .collect();
        Ok(())
    }

    fn run_evaluation(&mut self, ctx: &EvaluationContext, random: &dyn ResultSource) {
        while self.results.len() < self.number as usize {
            let result = self.roll_once(ctx, random);
            self.results.push(DieOutcome::active(result));
        }
        self.apply_keep();
        self.evaluated = true;
    }

    fn apply_keep(&mut self) {
        let Some(rule) = self.keep else {
            return;
        };

        let mut order: Vec<usize> = (0..self.results.len()).collect();
        match rule {
            KeepRule::Highest(_) => {
                order.sort_by(|&a, &b| self.results[b].result.cmp(&self.results[a].result))
            }
            KeepRule::Lowest(_) => {
                order.sort_by(|&a, &b| self.results[a].result.cmp(&self.results[b].result))
            }
        }

        let keep = rule.count() as usize;
        for (rank, index) in order.into_iter().enumerate() {
            self.results[index].active = rank < keep;
        }
    }
}
