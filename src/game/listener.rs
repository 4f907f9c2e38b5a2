//! Game notifications.

use crate::game::base::GameCore;
use crate::game::score::Score;

/// Receives lifecycle notifications from a running game.
///
/// Callbacks run synchronously on the game's worker thread, in
/// registration order.
pub trait GameListener: Send + Sync {
    /// The game loop completed normally.
    fn on_game_ended(&self, game: &GameCore, score: &Score);

    /// Round `current` of `total` is about to start (1-based).
    fn on_round_started(&self, game: &GameCore, current: u32, total: u32);

    /// Round `current` of `total` has been played.
    fn on_round_ended(&self, game: &GameCore, current: u32, total: u32);
}
