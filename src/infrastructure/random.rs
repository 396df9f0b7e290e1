//! Random result source backed by the thread-local generator.

use rand::Rng;

use crate::domain::services::ResultSource;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSource for SystemRandom {
    fn draw(&self, faces: u32) -> u32 {
        if faces == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(1..=faces)
    }
}
