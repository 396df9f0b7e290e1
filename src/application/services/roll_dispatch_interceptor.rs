//! Roll dispatch interceptor - applies the pending override to a configured roll
//!
//! Runs once per d20 test, after configuration and before any die is
//! evaluated. The pending override is consumed on every call, whether or not
//! it can be applied.

use std::sync::Arc;

use crate::application::services::PendingOverrideService;
use crate::domain::entities::{EvaluationPlan, RollRequest};

pub struct RollDispatchInterceptor {
    overrides: Arc<PendingOverrideService>,
}

impl RollDispatchInterceptor {
    pub fn new(overrides: Arc<PendingOverrideService>) -> Self {
        Self { overrides }
    }

    /// Consume the pending override and plan the evaluation of `request`.
    ///
    /// With nothing pending the request is left untouched and the plan is
    /// fully randomized. Otherwise the primary d20 is sized for the advantage
    /// mode and forced to the pending face.
    pub async fn intercept(&self, request: &mut RollRequest) -> EvaluationPlan {
        let pending = self.overrides.consume_and_reset().await;
        let Some(tag) = pending.forced_tag() else {
            return EvaluationPlan::randomized();
        };

        let Some(index) = request.primary_d20_index() else {
            tracing::warn!(
                roll_id = %request.id,
                shape = ?request.shape,
                "Pending d20 override dropped: roll is not a recognized d20 test"
            );
            return EvaluationPlan::randomized();
        };

        let count = request
            .advantage_mode
            .dice_count(request.extra_advantage_die);
        request.terms[index].number = count;
        request.stamp_forced_value(tag);

        EvaluationPlan::randomized().force_term(index, tag)
    }
}
