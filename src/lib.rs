//! # Paingame
//!
//! A Raspberry Pi party game: players sit at buzzer seats wired to GPIO and
//! the unlucky ones get a short electric shock.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         PAINGAME                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── interrupt.rs- Cancellable sleeps                        │
//! │                                                              │
//! │  hardware/       - Digital I/O capabilities                  │
//! │  ├── virtual_pin - In-memory pins (simulation, tests)        │
//! │  ├── rpi.rs      - rppal GPIO backend (feature `gpio`)       │
//! │  └── layout.rs   - Seat wiring and provisioning              │
//! │                                                              │
//! │  game/           - Game framework                            │
//! │  ├── base.rs     - Lifecycle contract and run driver         │
//! │  ├── listener.rs - Notification callbacks                    │
//! │  ├── score.rs    - Score and winner finding                  │
//! │  ├── shocky.rs   - The magic number game                     │
//! │  └── mode.rs     - Game selection and registry               │
//! │                                                              │
//! │  player.rs       - Seats and their pins                      │
//! │  controller.rs   - Runs a game, drives LEDs between rounds   │
//! │  config.rs       - TOML / env configuration                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! One game runs at a time on a single worker thread. Listener callbacks run
//! synchronously on that worker, so game state is never shared across
//! threads. Non-blocking pulses use short-lived helper threads inside the
//! GPIO backend.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod game;
pub mod hardware;
pub mod player;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::PaingameConfig;
pub use controller::{ControllerConfig, GameController, GameHandle};
pub use error::GameError;
pub use game::{Game, GameListener, GameMode, GameOutcome, GameRegistry, Score, Shocky};
pub use player::{Player, PlayerId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
