//! Game Framework
//!
//! ## Module Structure
//!
//! - `base`: lifecycle contract shared by all variants
//! - `listener`: notification callbacks
//! - `score`: final score and winner finding
//! - `shocky`: the magic number game
//! - `mode`: game selection and registry

pub mod base;
pub mod listener;
pub mod mode;
pub mod score;
pub mod shocky;

// Re-export key types
pub use base::{Game, GameCore, GameOutcome, GameState, MAX_PLAYERS};
pub use listener::GameListener;
pub use mode::{GameMode, GameRegistry};
pub use score::{find_winners, Score};
pub use shocky::{Shocky, ShockyConfig, SHOCK_DURATION};
