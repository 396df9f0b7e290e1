//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize request and response bodies without the domain model
//! knowing about them.

mod override_control;
mod roll;

pub use override_control::*;
pub use roll::*;
