//! Core primitives shared by every game.
//!
//! Seeded randomness and cooperative cancellation. Nothing in here touches
//! hardware.

pub mod interrupt;
pub mod rng;

// Re-export core types
pub use interrupt::CancelToken;
pub use rng::{DeterministicRng, RandomSource};
