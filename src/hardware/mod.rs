//! Digital I/O capabilities.
//!
//! Games only ever see [`OutputPin`] and [`InputPin`]. Two backends exist:
//!
//! - `virtual_pin`: in-memory pins with a shared event log (simulation, tests)
//! - `rpi`: Raspberry Pi GPIO through `rppal` (feature `gpio`)

use std::fmt;
use std::time::Duration;

pub mod layout;
#[cfg(feature = "gpio")]
pub mod rpi;
pub mod virtual_pin;

pub use layout::{PinLayout, SeatPins};
pub use virtual_pin::{PinEvent, PinLog, PinRecord, VirtualPin};

/// Logic level of a pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Level {
    /// Inactive.
    #[default]
    Low,
    /// Active.
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// A digital output (shock electrode or indicator LED).
pub trait OutputPin: Send + Sync + fmt::Debug {
    /// Drive the pin active.
    fn set_high(&self);

    /// Drive the pin inactive.
    fn set_low(&self);

    /// Drive high for `duration`, then low.
    ///
    /// With `blocking` the call returns after the pin is low again, otherwise
    /// it returns immediately.
    fn pulse(&self, duration: Duration, blocking: bool);

    /// Current level as last driven.
    fn level(&self) -> Level;
}

/// A digital input (player buzzer).
pub trait InputPin: Send + Sync + fmt::Debug {
    /// Read the current level.
    fn read(&self) -> Level;

    /// Whether the input currently reads high.
    fn is_high(&self) -> bool {
        self.read() == Level::High
    }
}
