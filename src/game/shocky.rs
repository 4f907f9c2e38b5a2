//! Shocky
//!
//! A magic number is drawn once from `[0, probability)`. Every round each
//! player draws from the same range; matching the magic number earns a point
//! and a shock. The higher the probability value, the harder it is to get
//! shocked. If nobody was shocked after the last round, everybody is shocked
//! once, one after the other.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::rng::{DeterministicRng, RandomSource};
use crate::error::GameError;
use crate::game::base::{Game, GameCore};
use crate::game::score::Score;
use crate::player::Player;

/// How long a single shock lasts.
pub const SHOCK_DURATION: Duration = Duration::from_millis(300);

/// Shocky settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockyConfig {
    /// Rounds to play.
    pub rounds: u32,
    /// Size of the draw range. Must be positive.
    pub probability: u32,
    /// Pause after each round in milliseconds.
    pub pause_between_rounds_ms: u64,
}

impl Default for ShockyConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            probability: 10,
            pause_between_rounds_ms: 5000,
        }
    }
}

impl ShockyConfig {
    /// Reject a zero draw range.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.probability == 0 {
            return Err(GameError::invalid("shocky probability must be greater than 0"));
        }
        Ok(())
    }

    /// Pause after each round.
    pub fn pause_between_rounds(&self) -> Duration {
        Duration::from_millis(self.pause_between_rounds_ms)
    }
}

/// The Shocky game.
pub struct Shocky {
    core: GameCore,
    config: ShockyConfig,
    rng: Box<dyn RandomSource>,
}

impl Shocky {
    /// Display name.
    pub const NAME: &'static str = "Shocky";

    /// Create with an entropy-seeded RNG.
    pub fn new(config: ShockyConfig) -> Result<Self, GameError> {
        Self::seeded(config, None)
    }

    /// Create with a fixed seed, or entropy when `None`. The seed is logged.
    pub fn seeded(config: ShockyConfig, seed: Option<u64>) -> Result<Self, GameError> {
        let rng = match seed {
            Some(seed) => DeterministicRng::new(seed),
            None => DeterministicRng::from_entropy(),
        };
        info!("{} seed: {}", Self::NAME, rng.seed());
        Self::with_rng(config, rng)
    }

    /// Create with any random source.
    pub fn with_rng(config: ShockyConfig, rng: impl RandomSource + 'static) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            core: GameCore::new(Self::NAME),
            config,
            rng: Box::new(rng),
        })
    }

    /// Suppress physical pulses.
    pub fn with_simulation(mut self, simulation: bool) -> Self {
        self.core = self.core.with_simulation(simulation);
        self
    }

    /// Settings in use.
    pub fn config(&self) -> &ShockyConfig {
        &self.config
    }
}

impl Game for Shocky {
    fn core(&self) -> &GameCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GameCore {
        &mut self.core
    }

    fn setup(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        self.core.bind_players(players)?;
        for player in self.core.players() {
            info!("{} dares to play {}", player.name(), self.core.name());
        }
        Ok(())
    }

    fn run_loop(&mut self) -> Result<Score, GameError> {
        let Self { core, config, rng } = self;
        let players = core.players();
        let total = config.rounds;

        let mut score = Score::for_players(players);
        let magic_number = rng.next_int(config.probability);
        info!("Magic number is {}", magic_number);

        let mut anybody_shocked = false;

        for round in 1..=total {
            core.raise_round_started(round, total);

            let mut hit = vec![false; players.len()];
            for (i, player) in players.iter().enumerate() {
                let draw = rng.next_int(config.probability);
                if draw == magic_number {
                    info!("Player '{}' hit the magic number", player);
                    hit[i] = true;
                    score.add_point(player.id());
                    anybody_shocked = true;
                } else {
                    debug!("Player '{}' was lucky this time ({})", player, draw);
                }
            }

            // Shock everybody that hit the magic number
            for (player, _) in players.iter().zip(&hit).filter(|(_, hit)| **hit) {
                core.shock_player(player, SHOCK_DURATION, false)?;
            }

            info!(
                "Round {} of {} done, next one in {} ms",
                round,
                total,
                config.pause_between_rounds_ms
            );
            core.raise_round_ended(round, total);
            core.sleep(config.pause_between_rounds())?;
        }

        // Nobody escapes
        if !anybody_shocked {
            warn!("Nobody was shocked, shocking everybody");
            for player in players {
                core.shock_player(player, SHOCK_DURATION, true)?;
            }
        }

        Ok(score)
    }

    fn teardown(&mut self) -> Result<(), GameError> {
        self.core.reset_outputs();
        info!("{} torn down", self.core.name());
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
