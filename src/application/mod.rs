//! Application layer - Use cases wired against outbound ports
//!
//! This layer contains:
//! - Ports: the persistence contract for the pending override
//! - Services: override store access, the game-master control surface,
//!   roll dispatch interception and the roll pipeline
//! - DTOs: request and response shapes for the HTTP surface

pub mod dto;
pub mod ports;
pub mod services;
