//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting port
//! dependencies and returning domain entities or DTOs.

pub mod override_control_service;
pub mod pending_override_service;
pub mod roll_dispatch_interceptor;
pub mod roll_service;

pub use override_control_service::{base_scene_controls, OverrideControlService};
pub use pending_override_service::PendingOverrideService;
pub use roll_dispatch_interceptor::RollDispatchInterceptor;
pub use roll_service::RollService;
