//! Value objects - Immutable objects defined by their attributes

mod advantage;
mod forced_value;
mod ids;
mod pending_override;

pub use advantage::{AdvantageMode, RollShape};
pub use forced_value::{EvaluationContext, ForcedValueTag};
pub use ids::*;
pub use pending_override::{PendingOverride, MAX_OVERRIDE_FACE};
