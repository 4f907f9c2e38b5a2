//! Player Definitions
//!
//! A player is a seat at the table: a display name plus the three pins wired
//! to that seat.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::hardware::{InputPin, OutputPin};

/// Seat number of a player (1-based).
///
/// Implements Ord so scores iterate in seat order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create from a seat number.
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// A player and the I/O bound to their seat.
///
/// Cheap to clone; clones share the same pins.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    shock_pin: Arc<dyn OutputPin>,
    indicator_pin: Arc<dyn OutputPin>,
    buzzer_pin: Arc<dyn InputPin>,
}

impl Player {
    /// Create a player with all three pins.
    ///
    /// Fails with [`GameError::InvalidArgument`] if `name` is empty.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        shock_pin: Arc<dyn OutputPin>,
        indicator_pin: Arc<dyn OutputPin>,
        buzzer_pin: Arc<dyn InputPin>,
    ) -> Result<Self, GameError> {
        Self::builder(id, name)
            .shock_pin(shock_pin)
            .indicator_pin(indicator_pin)
            .buzzer_pin(buzzer_pin)
            .build()
    }

    /// Start building a player whose pins are supplied one by one.
    pub fn builder(id: PlayerId, name: impl Into<String>) -> PlayerBuilder {
        PlayerBuilder {
            id,
            name: name.into(),
            shock_pin: None,
            indicator_pin: None,
            buzzer_pin: None,
        }
    }

    /// Seat of this player.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the player. Empty names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), GameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GameError::invalid("player name must not be empty"));
        }
        self.name = name;
        Ok(())
    }

    /// Output that shocks this player.
    pub fn shock_pin(&self) -> &dyn OutputPin {
        self.shock_pin.as_ref()
    }

    /// Output driving this player's LED.
    pub fn indicator_pin(&self) -> &dyn OutputPin {
        self.indicator_pin.as_ref()
    }

    /// Input wired to this player's buzzer.
    pub fn buzzer_pin(&self) -> &dyn InputPin {
        self.buzzer_pin.as_ref()
    }

    /// Whether the buzzer is currently pressed.
    pub fn buzzer_pressed(&self) -> bool {
        self.buzzer_pin.is_high()
    }

    /// Drive shock and indicator outputs low.
    pub fn reset_output(&self) {
        self.indicator_pin.set_low();
        self.shock_pin.set_low();
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Player`]; every pin is mandatory.
#[derive(Debug)]
pub struct PlayerBuilder {
    id: PlayerId,
    name: String,
    shock_pin: Option<Arc<dyn OutputPin>>,
    indicator_pin: Option<Arc<dyn OutputPin>>,
    buzzer_pin: Option<Arc<dyn InputPin>>,
}

impl PlayerBuilder {
    /// Set the shock output.
    pub fn shock_pin(mut self, pin: Arc<dyn OutputPin>) -> Self {
        self.shock_pin = Some(pin);
        self
    }

    /// Set the indicator output.
    pub fn indicator_pin(mut self, pin: Arc<dyn OutputPin>) -> Self {
        self.indicator_pin = Some(pin);
        self
    }

    /// Set the buzzer input.
    pub fn buzzer_pin(mut self, pin: Arc<dyn InputPin>) -> Self {
        self.buzzer_pin = Some(pin);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Player, GameError> {
        if self.name.is_empty() {
            return Err(GameError::invalid("player name must not be empty"));
        }
        let shock_pin = self
            .shock_pin
            .ok_or_else(|| GameError::invalid("shock pin is required"))?;
        let indicator_pin = self
            .indicator_pin
            .ok_or_else(|| GameError::invalid("indicator pin is required"))?;
        let buzzer_pin = self
            .buzzer_pin
            .ok_or_else(|| GameError::invalid("buzzer pin is required"))?;

        Ok(Player {
            id: self.id,
            name: self.name,
            shock_pin,
            indicator_pin,
            buzzer_pin,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
