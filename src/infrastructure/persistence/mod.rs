//! Persistence adapters for the pending override
//!
//! Two backends implement the store port: an in-memory cell for single-run
//! sessions and a SQLite settings table that survives restarts.

mod factory;
mod in_memory_override_store;
mod sqlite_override_store;

pub use factory::create_override_store;
pub use in_memory_override_store::InMemoryOverrideStore;
pub use sqlite_override_store::SqliteOverrideStore;
