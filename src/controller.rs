//! Game Controller
//!
//! Hands the roster to a game, runs it on a dedicated worker thread and
//! reacts to its notifications: outputs are cleared before every round, and
//! winners get their LED lit once the game ends.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::core::interrupt::CancelToken;
use crate::error::GameError;
use crate::game::base::{Game, GameCore, GameOutcome};
use crate::game::listener::GameListener;
use crate::game::score::{find_winners, Score};
use crate::player::Player;

/// Controller settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How long winners' LEDs stay lit, and how long the controller waits
    /// before clearing all outputs, in milliseconds.
    pub win_indicator_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            win_indicator_ms: 2000,
        }
    }
}

impl ControllerConfig {
    /// Winner LED window.
    pub fn win_indicator(&self) -> Duration {
        Duration::from_millis(self.win_indicator_ms)
    }
}

/// Running game launched by [`GameController::play`].
#[derive(Debug)]
pub struct GameHandle {
    name: String,
    cancel: CancelToken,
    worker: JoinHandle<Result<GameOutcome, GameError>>,
}

impl GameHandle {
    /// Name of the running game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interrupt the game at its next blocking wait.
    pub fn cancel(&self) {
        info!("Cancelling {}", self.name);
        self.cancel.cancel();
    }

    /// Whether the worker has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and return how the game ended.
    pub fn join(self) -> Result<GameOutcome, GameError> {
        self.worker.join().map_err(|_| GameError::WorkerPanicked)?
    }
}

/// Drives a game and the seat outputs around it.
#[derive(Debug)]
pub struct GameController {
    players: Vec<Player>,
    config: ControllerConfig,
    simulation: bool,
}

impl GameController {
    /// Create a controller for `players`.
    pub fn new(players: Vec<Player>, config: ControllerConfig, simulation: bool) -> Arc<Self> {
        Arc::new(Self {
            players,
            config,
            simulation,
        })
    }

    /// All seated players.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Set up `game`, subscribe to it and start it on a worker thread.
    ///
    /// Returns as soon as the worker is launched. If setup fails the game is
    /// not started.
    pub fn play(self: &Arc<Self>, mut game: Box<dyn Game>) -> Result<GameHandle, GameError> {
        if let Err(e) = game.setup(self.players.clone()) {
            error!("Setup of {} failed: {}", game.name(), e);
            return Err(e);
        }
        game.add_listener(Arc::clone(self) as Arc<dyn GameListener>);

        let name = game.name().to_string();
        let cancel = game.core().cancel_token().clone();
        let worker = thread::Builder::new()
            .name("game".to_string())
            .spawn(move || game.run())?;

        info!("{} launched", name);
        Ok(GameHandle {
            name,
            cancel,
            worker,
        })
    }

    fn reset_outputs(&self) {
        for player in &self.players {
            player.reset_output();
        }
    }
}

impl GameListener for GameController {
    fn on_game_ended(&self, game: &GameCore, score: &Score) {
        info!("{} has ended", game.name());
        let window = self.config.win_indicator();

        for id in find_winners(score) {
            let Some(winner) = self.players.iter().find(|p| p.id() == id) else {
                warn!("Score names unknown {}", id);
                continue;
            };
            info!("Winner: {} ({} points)", winner, score.get(id).unwrap_or(0));
            if self.simulation {
                warn!("Simulation mode, no actual pin triggering");
            } else {
                winner.indicator_pin().pulse(window, false);
            }
        }

        // Let the LEDs finish before clearing everything
        if let Err(e) = game.cancel_token().sleep(window) {
            error!("Unable to delay: {}", e);
        }

        for player in &self.players {
            info!("Switching off outputs of {}", player);
            player.reset_output();
        }
    }

    fn on_round_started(&self, game: &GameCore, current: u32, total: u32) {
        info!(
            "Round {} of {} of {} is about to start",
            current,
            total,
            game.name()
        );
        self.reset_outputs();
    }

    fn on_round_ended(&self, game: &GameCore, current: u32, total: u32) {
        info!("{} of {} rounds of {} have been played", current, total, game.name());
    }
}

// =============================================================================
// TESTS
// =============================================================================
