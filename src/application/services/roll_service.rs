//! Roll service - the roll pipeline
//!
//! Parse and configure the request, let the interceptor plan the evaluation
//! of d20 tests, then evaluate every term.

use std::sync::Arc;

use thiserror::Error;

use crate::application::dto::RollRequestDto;
use crate::application::services::RollDispatchInterceptor;
use crate::domain::entities::{DiceError, EvaluationPlan, RollRequest, RollResult};
use crate::domain::services::ResultSource;

#[derive(Debug, Error)]
pub enum RollError {
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error("Flavor text is too long ({0} characters, max {max})", max = MAX_FLAVOR_LENGTH)]
    FlavorTooLong(usize),
}

/// Longest flavor text accepted on a roll.
pub const MAX_FLAVOR_LENGTH: usize = 200;

pub struct RollService {
    interceptor: Option<RollDispatchInterceptor>,
    random: Arc<dyn ResultSource>,
}

impl RollService {
    /// A pipeline that never consults a pending override.
    pub fn new(random: Arc<dyn ResultSource>) -> Self {
        Self {
            interceptor: None,
            random,
        }
    }

    /// Install the override interceptor after roll configuration.
    pub fn with_interceptor(mut self, interceptor: RollDispatchInterceptor) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn is_override_enabled(&self) -> bool {
        self.interceptor.is_some()
    }

    pub async fn roll(&self, dto: RollRequestDto) -> Result<RollResult, RollError> {
        if let Some(flavor) = &dto.flavor {
            let length = flavor.chars().count();
            if length > MAX_FLAVOR_LENGTH {
                return Err(RollError::FlavorTooLong(length));
            }
        }

        let mut request = RollRequest::new(
            dto.shape,
            &dto.formula,
            dto.advantage_mode,
            dto.extra_advantage_die,
        )?;
        if let Some(flavor) = dto.flavor {
            request = request.with_flavor(flavor);
        }

        let plan = match &self.interceptor {
            Some(interceptor) if request.shape.is_d20_test() => {
                interceptor.intercept(&mut request).await
            }
            _ => EvaluationPlan::randomized(),
        };

        let result = request.evaluate(plan, self.random.as_ref()).await;
        tracing::debug!(
            roll_id = %result.id,
            forced = request.options().is_forced(),
            "Roll evaluated: {}",
            result
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockPendingOverrideStore;
    use crate::application::services::PendingOverrideService;
    use crate::domain::services::MockResultSource;
    use crate::domain::value_objects::{AdvantageMode, PendingOverride, RollShape};
    use std::sync::Mutex;

    /// Store mock that behaves like a real single-slot store.
    fn store_holding(initial: i64) -> MockPendingOverrideStore {
        let slot = Arc::new(Mutex::new(initial));
        let mut store = MockPendingOverrideStore::new();

        let consume_slot = slot.clone();
        store.expect_consume_and_reset().returning(move || {
            let mut value = consume_slot.lock().unwrap();
            let taken = *value;
            *value = 0;
            Ok(PendingOverride::clamped(taken))
        });
        store
            .expect_get()
            .returning(move || Ok(PendingOverride::clamped(*slot.lock().unwrap())));
        store
    }

    fn service(store: MockPendingOverrideStore, random: MockResultSource) -> RollService {
        let overrides = Arc::new(PendingOverrideService::new(Arc::new(store)));
        RollService::new(Arc::new(random))
            .with_interceptor(RollDispatchInterceptor::new(overrides))
    }

    fn random_returning(value: u32) -> MockResultSource {
        let mut random = MockResultSource::new();
        random.expect_draw().returning(move |_| value);
        random
    }

    fn untouched_random() -> MockResultSource {
        let mut random = MockResultSource::new();
        random.expect_draw().never();
        random
    }

    #[tokio::test]
    async fn test_every_face_is_forced_on_normal_check() {
        for v in 1..=20 {
            let service = service(store_holding(v), untouched_random());
            let result = service
                .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20"))
                .await
                .unwrap();

            assert_eq!(result.terms[0].results.len(), 1);
            assert_eq!(i64::from(result.terms[0].results[0].result), v);
            assert_eq!(i64::from(result.total), v);
        }
    }

    #[tokio::test]
    async fn test_every_face_is_forced_under_advantage() {
        for v in 1..=20u32 {
            for (extra_die, dice) in [(false, 2), (true, 3)] {
                let service = service(store_holding(i64::from(v)), untouched_random());
                let result = service
                    .roll(
                        RollRequestDto::new(RollShape::Attack, "1d20+2")
                            .with_advantage(AdvantageMode::Advantage, extra_die),
                    )
                    .await
                    .unwrap();

                let faces = &result.terms[0].results;
                assert_eq!(faces.len(), dice);
                assert!(faces.iter().all(|d| d.result == v));
                assert_eq!(faces.iter().filter(|d| d.active).count(), 1);
                assert_eq!(result.terms[0].subtotal, v);
            }
        }
    }

    #[tokio::test]
    async fn test_forced_check_with_modifiers() {
        let service = service(store_holding(15), untouched_random());
        let result = service
            .roll(RollRequestDto::new(RollShape::Skill, "1d20 + 3 + 2"))
            .await
            .unwrap();

        assert_eq!(result.total, 20);
        assert_eq!(result.formula, "1d20 + 5");
    }

    #[tokio::test]
    async fn test_forced_twenty_under_disadvantage() {
        let service = service(store_holding(20), untouched_random());
        let result = service
            .roll(
                RollRequestDto::new(RollShape::SavingThrow, "1d20")
                    .with_advantage(AdvantageMode::Disadvantage, false),
            )
            .await
            .unwrap();

        let faces = &result.terms[0].results;
        assert_eq!(faces.len(), 2);
        assert!(faces.iter().all(|d| d.result == 20));
        assert_eq!(result.total, 20);
        assert!(result.natural_20);
        assert_eq!(result.formula, "2d20kl");
    }

    #[tokio::test]
    async fn test_override_is_one_shot() {
        let service = service(store_holding(15), random_returning(4));

        let first = service
            .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20"))
            .await
            .unwrap();
        let second = service
            .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20"))
            .await
            .unwrap();

        assert_eq!(first.total, 15);
        assert_eq!(second.total, 4);
    }

    #[tokio::test]
    async fn test_nothing_pending_keeps_generator_output() {
        let service = service(store_holding(0), random_returning(11));
        let result = service
            .roll(RollRequestDto::new(RollShape::Attack, "1d20+1"))
            .await
            .unwrap();
        assert_eq!(result.total, 12);
    }

    #[tokio::test]
    async fn test_damage_roll_leaves_override_pending() {
        let mut store = MockPendingOverrideStore::new();
        store.expect_consume_and_reset().never();
        let service = service(store, random_returning(3));

        let result = service
            .roll(RollRequestDto::new(RollShape::Damage, "2d20+1"))
            .await
            .unwrap();

        assert_eq!(result.total, 7);
    }

    #[tokio::test]
    async fn test_check_without_d20_drops_override() {
        let service = service(store_holding(18), random_returning(2));

        let dropped = service
            .roll(RollRequestDto::new(RollShape::Tool, "1d6"))
            .await
            .unwrap();
        let next = service
            .roll(RollRequestDto::new(RollShape::Tool, "1d20"))
            .await
            .unwrap();

        assert_eq!(dropped.total, 2);
        assert_eq!(next.total, 2);
    }

    #[tokio::test]
    async fn test_disabled_override_never_consumes() {
        let service = RollService::new(Arc::new(random_returning(9)));
        assert!(!service.is_override_enabled());

        let result = service
            .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20"))
            .await
            .unwrap();
        assert_eq!(result.total, 9);
    }

    #[tokio::test]
    async fn test_invalid_formula_is_reported() {
        let service = RollService::new(Arc::new(untouched_random()));
        let err = service
            .roll(RollRequestDto::new(RollShape::Generic, "1d20+"))
            .await
            .unwrap_err();
        assert!(matches!(err, RollError::Dice(DiceError::InvalidNotation(_))));
    }

    #[tokio::test]
    async fn test_space_separated_modifier_keeps_override_pending() {
        let mut store = MockPendingOverrideStore::new();
        store.expect_consume_and_reset().never();
        let service = service(store, untouched_random());

        let err = service
            .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20 5"))
            .await
            .unwrap_err();

        assert!(matches!(err, RollError::Dice(DiceError::InvalidNotation(_))));
    }

    #[tokio::test]
    async fn test_result_has_no_override_trace() {
        let service = service(store_holding(13), untouched_random());
        let result = service
            .roll(RollRequestDto::new(RollShape::AbilityCheck, "1d20"))
            .await
            .unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("forced"));
        assert!(!json.contains("override"));
    }
}
