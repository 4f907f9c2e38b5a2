//! Raspberry Pi GPIO backend.
//!
//! Pin numbers are BCM numbers. Outputs are provisioned low and pulled low
//! again when dropped; buzzer inputs get the internal pull-down.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rppal::gpio::Gpio;
use tracing::{debug, warn};

use super::{InputPin, Level, OutputPin};
use crate::error::GameError;

/// Output pin backed by `rppal`.
#[derive(Debug)]
pub struct RpiOutputPin {
    bcm: u8,
    pin: Arc<Mutex<rppal::gpio::OutputPin>>,
}

impl RpiOutputPin {
    /// Claim `bcm` as an output, initially low.
    pub fn provision(gpio: &Gpio, bcm: u8) -> Result<Self, GameError> {
        let pin = gpio.get(bcm)?.into_output_low();
        debug!("Provisioned output pin {}", bcm);
        Ok(Self {
            bcm,
            pin: Arc::new(Mutex::new(pin)),
        })
    }
}

impl OutputPin for RpiOutputPin {
    fn set_high(&self) {
        self.pin.lock().set_high();
    }

    fn set_low(&self) {
        self.pin.lock().set_low();
    }

    fn pulse(&self, duration: Duration, blocking: bool) {
        let pin = Arc::clone(&self.pin);
        let run = move || {
            pin.lock().set_high();
            thread::sleep(duration);
            pin.lock().set_low();
        };

        if blocking {
            run();
        } else if let Err(e) = thread::Builder::new()
            .name(format!("pulse-{}", self.bcm))
            .spawn(run)
        {
            warn!("Could not pulse pin {} in background: {}", self.bcm, e);
        }
    }

    fn level(&self) -> Level {
        if self.pin.lock().is_set_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Drop for RpiOutputPin {
    fn drop(&mut self) {
        self.pin.lock().set_low();
    }
}

/// Input pin backed by `rppal`.
#[derive(Debug)]
pub struct RpiInputPin {
    pin: Mutex<rppal::gpio::InputPin>,
}

impl RpiInputPin {
    /// Claim `bcm` as an input with pull-down.
    pub fn provision(gpio: &Gpio, bcm: u8) -> Result<Self, GameError> {
        let pin = gpio.get(bcm)?.into_input_pulldown();
        debug!("Provisioned input pin {}", bcm);
        Ok(Self { pin: Mutex::new(pin) })
    }
}

impl InputPin for RpiInputPin {
    fn read(&self) -> Level {
        match self.pin.lock().read() {
            rppal::gpio::Level::High => Level::High,
            rppal::gpio::Level::Low => Level::Low,
        }
    }
}
