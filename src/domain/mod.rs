//! Domain layer - Core dice logic with no I/O
//!
//! This layer contains:
//! - Entities: die terms, roll requests and roll results
//! - Value Objects: pending override, forced-value tags, advantage modes
//! - Domain Services: formula parsing and result sources

pub mod entities;
pub mod services;
pub mod value_objects;
