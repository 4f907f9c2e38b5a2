//! Game selection.
//!
//! [`GameMode`] names a variant; [`GameRegistry`] knows how to build one.
//! The registry is a plain value built once at startup and passed around.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::config::PaingameConfig;
use crate::error::GameError;
use crate::game::base::Game;
use crate::game::shocky::Shocky;

/// Selectable game variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameMode {
    /// Magic number game.
    Shocky,
}

impl GameMode {
    /// Every mode known to this build.
    pub const ALL: [GameMode; 1] = [GameMode::Shocky];

    /// Lowercase name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Shocky => "shocky",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    /// Case-insensitive; anything unrecognized is an error, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownGameMode(s.to_string()))
    }
}

type GameFactory = Box<dyn Fn() -> Result<Box<dyn Game>, GameError> + Send + Sync>;

/// Builds a fresh game instance per play session.
#[derive(Default)]
pub struct GameRegistry {
    factories: BTreeMap<GameMode, GameFactory>,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in game, configured from `config`.
    pub fn from_config(config: &PaingameConfig) -> Self {
        let mut registry = Self::new();

        let shocky = config.shocky.clone();
        let seed = config.seed;
        let simulation = config.simulation;
        registry.register(GameMode::Shocky, move || {
            let game = Shocky::seeded(shocky.clone(), seed)?.with_simulation(simulation);
            Ok(Box::new(game) as Box<dyn Game>)
        });

        registry
    }

    /// Register (or replace) the factory for `mode`.
    pub fn register<F>(&mut self, mode: GameMode, factory: F)
    where
        F: Fn() -> Result<Box<dyn Game>, GameError> + Send + Sync + 'static,
    {
        self.factories.insert(mode, Box::new(factory));
    }

    /// Registered modes, in declaration order.
    pub fn modes(&self) -> Vec<GameMode> {
        self.factories.keys().copied().collect()
    }

    /// Build a new game for `mode`.
    pub fn create(&self, mode: GameMode) -> Result<Box<dyn Game>, GameError> {
        let factory = self
            .factories
            .get(&mode)
            .ok_or_else(|| GameError::UnknownGameMode(mode.to_string()))?;
        info!("Loading game '{}'...", mode);
        factory()
    }

    /// Parse `name` and build the matching game.
    pub fn create_by_name(&self, name: &str) -> Result<Box<dyn Game>, GameError> {
        self.create(name.parse()?)
    }
}
