//! Outbound ports - Interfaces that the application requires from external systems

mod pending_override_port;

#[cfg(test)]
pub use pending_override_port::MockPendingOverrideStore;
pub use pending_override_port::{OverrideStoreError, PendingOverrideStore};
