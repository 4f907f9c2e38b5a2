//! In-memory pins.
//!
//! Every operation is appended to a [`PinLog`] shared between pins, so the
//! relative order of operations across players can be inspected. Pulses are
//! recorded, never slept.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use super::{InputPin, Level, OutputPin};

/// One operation performed on a virtual pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinEvent {
    /// Driven high.
    High,
    /// Driven low.
    Low,
    /// Pulsed.
    Pulse {
        /// Pulse length.
        duration: Duration,
        /// Whether the caller waited for completion.
        blocking: bool,
    },
}

/// A labelled [`PinEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinRecord {
    /// Label of the pin, e.g. `"p1-shock"`.
    pub pin: String,
    /// What happened.
    pub event: PinEvent,
}

/// Ordered log shared by a set of virtual pins.
///
/// A discarding log keeps nothing and only traces each operation at debug
/// level, for long simulated sessions nobody inspects afterwards.
#[derive(Clone, Debug)]
pub struct PinLog {
    records: Arc<Mutex<Vec<PinRecord>>>,
    keep: bool,
}

impl Default for PinLog {
    fn default() -> Self {
        Self {
            records: Arc::default(),
            keep: true,
        }
    }
}

impl PinLog {
    /// Create an empty log that keeps every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that only traces operations.
    pub fn discarding() -> Self {
        Self {
            keep: false,
            ..Self::default()
        }
    }

    fn push(&self, pin: &str, event: PinEvent) {
        if !self.keep {
            debug!("Virtual pin {}: {:?}", pin, event);
            return;
        }
        self.records.lock().push(PinRecord {
            pin: pin.to_string(),
            event,
        });
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<PinRecord> {
        self.records.lock().clone()
    }

    /// Events recorded for one pin.
    pub fn events_for(&self, pin: &str) -> Vec<PinEvent> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.pin == pin)
            .map(|r| r.event.clone())
            .collect()
    }

    /// Labels of pulsed pins, in pulse order.
    pub fn pulsed_pins(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| matches!(r.event, PinEvent::Pulse { .. }))
            .map(|r| r.pin.clone())
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

/// A pin that exists only in memory.
#[derive(Debug)]
pub struct VirtualPin {
    label: String,
    level: Mutex<Level>,
    log: PinLog,
}

impl VirtualPin {
    /// Create a low pin that records into `log`.
    pub fn new(label: impl Into<String>, log: &PinLog) -> Self {
        Self {
            label: label.into(),
            level: Mutex::new(Level::Low),
            log: log.clone(),
        }
    }

    /// Force the level without logging, e.g. to simulate a pressed buzzer.
    pub fn force(&self, level: Level) {
        *self.level.lock() = level;
    }
}

impl OutputPin for VirtualPin {
    fn set_high(&self) {
        *self.level.lock() = Level::High;
        self.log.push(&self.label, PinEvent::High);
    }

    fn set_low(&self) {
        *self.level.lock() = Level::Low;
        self.log.push(&self.label, PinEvent::Low);
    }

    fn pulse(&self, duration: Duration, blocking: bool) {
        // Pin ends low once the pulse is over
        *self.level.lock() = Level::Low;
        self.log.push(&self.label, PinEvent::Pulse { duration, blocking });
    }

    fn level(&self) -> Level {
        *self.level.lock()
    }
}

impl InputPin for VirtualPin {
    fn read(&self) -> Level {
        *self.level.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_are_logged_in_order() {
        let log = PinLog::new();
        let a = VirtualPin::new("a", &log);
        let b = VirtualPin::new("b", &log);

        a.set_high();
        b.pulse(Duration::from_millis(300), false);
        a.set_low();

        let records = log.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], PinRecord { pin: "a".into(), event: PinEvent::High });
        assert_eq!(records[1].pin, "b");
        assert_eq!(records[2], PinRecord { pin: "a".into(), event: PinEvent::Low });
        assert_eq!(log.pulsed_pins(), vec!["b".to_string()]);
    }

    #[test]
    fn test_discarding_log_keeps_nothing() {
        let log = PinLog::discarding();
        let shock = VirtualPin::new("p1-shock", &log);

        shock.set_high();
        shock.pulse(Duration::from_millis(300), true);

        assert!(log.records().is_empty());
        assert_eq!(OutputPin::level(&shock), Level::Low);
    }

    #[test]
    fn test_level_tracks_writes() {
        let log = PinLog::new();
        let pin = VirtualPin::new("led", &log);

        assert_eq!(OutputPin::level(&pin), Level::Low);
        pin.set_high();
        assert_eq!(OutputPin::level(&pin), Level::High);
        pin.pulse(Duration::from_millis(5), true);
        assert_eq!(OutputPin::level(&pin), Level::Low);
    }

    #[test]
    fn test_forced_input() {
        let log = PinLog::new();
        let buzzer = VirtualPin::new("buzzer", &log);

        assert!(!buzzer.is_high());
        buzzer.force(Level::High);
        assert!(buzzer.is_high());
        assert!(log.records().is_empty());
    }

    #[test]
    fn test_events_for_and_clear() {
        let log = PinLog::new();
        let pin = VirtualPin::new("x", &log);
        pin.set_low();
        pin.pulse(Duration::from_millis(1), true);

        assert_eq!(
            log.events_for("x"),
            vec![
                PinEvent::Low,
                PinEvent::Pulse { duration: Duration::from_millis(1), blocking: true }
            ]
        );
        log.clear();
        assert!(log.records().is_empty());
    }
}
