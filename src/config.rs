//! Configuration
//!
//! Loaded once in `main` and passed by reference. Precedence, lowest first:
//! defaults, TOML file, environment, command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::ControllerConfig;
use crate::error::GameError;
use crate::game::base::MAX_PLAYERS;
use crate::game::shocky::ShockyConfig;
use crate::hardware::PinLayout;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaingameConfig {
    /// Log pulses instead of driving pins.
    pub simulation: bool,
    /// RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Display names, seat 1 first.
    pub players: Vec<String>,
    /// How many seats play (1 to 4).
    pub player_count: usize,
    /// Seat wiring.
    pub pins: PinLayout,
    /// Shocky settings.
    pub shocky: ShockyConfig,
    /// Controller settings.
    pub controller: ControllerConfig,
}

impl Default for PaingameConfig {
    fn default() -> Self {
        Self {
            simulation: true,
            seed: None,
            players: (1..=MAX_PLAYERS).map(default_name).collect(),
            player_count: MAX_PLAYERS,
            pins: PinLayout::default(),
            shocky: ShockyConfig::default(),
            controller: ControllerConfig::default(),
        }
    }
}

fn default_name(seat: usize) -> String {
    format!("Player {}", seat)
}

/// `1|true|yes|on` or `0|false|no|off`, any case.
fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl PaingameConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, GameError> {
        toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Defaults, or the given file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, GameError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PAINGAME_SIMULATION` and `PAINGAME_SEED` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PAINGAME_SIMULATION") {
            self.simulation = parse_switch(&value).ok_or_else(|| {
                GameError::Config(format!("PAINGAME_SIMULATION is not a switch: {}", value))
            })?;
        }
        if let Some(value) = lookup("PAINGAME_SEED") {
            let seed = value
                .trim()
                .parse()
                .map_err(|_| GameError::Config(format!("PAINGAME_SEED is not a number: {}", value)))?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Override the display name of `seat` (1-based).
    pub fn set_player_name(&mut self, seat: usize, name: String) -> Result<(), GameError> {
        if seat == 0 || seat > MAX_PLAYERS {
            return Err(GameError::invalid(format!("no seat {}", seat)));
        }
        while self.players.len() < seat {
            let next = self.players.len() + 1;
            self.players.push(default_name(next));
        }
        self.players[seat - 1] = name;
        Ok(())
    }

    /// Names of the seats that play, padded with defaults.
    pub fn roster_names(&self) -> Result<Vec<String>, GameError> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(GameError::invalid(format!(
                "player count must be 1 to {}, got {}",
                MAX_PLAYERS, self.player_count
            )));
        }
        Ok((1..=self.player_count)
            .map(|seat| {
                self.players
                    .get(seat - 1)
                    .cloned()
                    .unwrap_or_else(|| default_name(seat))
            })
            .collect())
    }

    /// Check everything that would otherwise fail mid-startup.
    pub fn validate(&self) -> Result<(), GameError> {
        self.shocky.validate()?;
        let names = self.roster_names()?;
        if let Some(seat) = names.iter().position(|n| n.is_empty()) {
            return Err(GameError::invalid(format!("player {} has an empty name", seat + 1)));
        }
        Ok(())
    }
}
