//! Seat wiring and player provisioning.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::virtual_pin::{PinLog, VirtualPin};
use crate::error::GameError;
use crate::game::base::MAX_PLAYERS;
use crate::player::{Player, PlayerId};

/// BCM pin numbers wired to one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPins {
    /// Shock electrode output.
    pub shock: u8,
    /// Indicator LED output.
    pub indicator: u8,
    /// Buzzer input.
    pub buzzer: u8,
}

/// Wiring of all four seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinLayout {
    /// Seat 1 to 4, in order.
    pub seats: [SeatPins; MAX_PLAYERS],
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            seats: [
                SeatPins { shock: 18, indicator: 24, buzzer: 3 },
                SeatPins { shock: 27, indicator: 25, buzzer: 8 },
                SeatPins { shock: 22, indicator: 4, buzzer: 7 },
                SeatPins { shock: 23, indicator: 2, buzzer: 10 },
            ],
        }
    }
}

impl PinLayout {
    /// Provision one player per name, seat 1 first.
    ///
    /// Simulation uses virtual pins recording into `log`; live mode needs
    /// the `gpio` feature.
    pub fn provision(
        &self,
        names: &[String],
        simulation: bool,
        log: &PinLog,
    ) -> Result<Vec<Player>, GameError> {
        if simulation {
            return self.virtual_players(names, log);
        }

        #[cfg(feature = "gpio")]
        {
            self.gpio_players(names)
        }
        #[cfg(not(feature = "gpio"))]
        {
            Err(GameError::Hardware(
                "live mode needs a build with the `gpio` feature".to_string(),
            ))
        }
    }

    /// Players on in-memory pins labelled `p<seat>-shock`, `p<seat>-led`
    /// and `p<seat>-buzzer`.
    pub fn virtual_players(&self, names: &[String], log: &PinLog) -> Result<Vec<Player>, GameError> {
        check_roster(names)?;
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let seat = i as u8 + 1;
                Player::new(
                    PlayerId::new(seat),
                    name.clone(),
                    Arc::new(VirtualPin::new(format!("p{}-shock", seat), log)),
                    Arc::new(VirtualPin::new(format!("p{}-led", seat), log)),
                    Arc::new(VirtualPin::new(format!("p{}-buzzer", seat), log)),
                )
            })
            .collect()
    }

    /// Players on real GPIO pins.
    #[cfg(feature = "gpio")]
    pub fn gpio_players(&self, names: &[String]) -> Result<Vec<Player>, GameError> {
        use super::rpi::{RpiInputPin, RpiOutputPin};

        check_roster(names)?;
        let gpio = rppal::gpio::Gpio::new()?;
        names
            .iter()
            .zip(self.seats.iter())
            .enumerate()
            .map(|(i, (name, pins))| {
                info!(
                    "Seat {}: shock={} led={} buzzer={}",
                    i + 1,
                    pins.shock,
                    pins.indicator,
                    pins.buzzer
                );
                Player::new(
                    PlayerId::new(i as u8 + 1),
                    name.clone(),
                    Arc::new(RpiOutputPin::provision(&gpio, pins.shock)?),
                    Arc::new(RpiOutputPin::provision(&gpio, pins.indicator)?),
                    Arc::new(RpiInputPin::provision(&gpio, pins.buzzer)?),
                )
            })
            .collect()
    }
}

fn check_roster(names: &[String]) -> Result<(), GameError> {
    if names.is_empty() || names.len() > MAX_PLAYERS {
        return Err(GameError::invalid(format!(
            "need 1 to {} player names, got {}",
            MAX_PLAYERS,
            names.len()
        )));
    }
    info!("Provisioning {} seats", names.len());
    Ok(())
}
