//! Error Types
//!
//! One taxonomy for the whole library. The binary wraps these in `anyhow`.

use thiserror::Error;

use crate::game::base::GameState;

/// Errors raised by players, games, the controller and configuration.
#[derive(Debug, Error)]
pub enum GameError {
    /// A construction precondition was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A blocking wait was cancelled.
    #[error("interrupted while waiting")]
    Interrupted,

    /// The selected game mode has no registered variant.
    #[error("unknown game mode '{0}'")]
    UnknownGameMode(String),

    /// Lifecycle method called in the wrong state.
    #[error("game is {actual:?}, expected {expected:?}")]
    InvalidState {
        /// State the operation requires.
        expected: GameState,
        /// State the game was actually in.
        actual: GameState,
    },

    /// Pin provisioning failed.
    #[error("hardware error: {0}")]
    Hardware(String),

    /// Config file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The game worker thread could not be launched.
    #[error("failed to spawn game thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The game worker thread panicked.
    #[error("game thread panicked")]
    WorkerPanicked,
}

impl GameError {
    /// Shorthand for [`GameError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(feature = "gpio")]
impl From<rppal::gpio::Error> for GameError {
    fn from(err: rppal::gpio::Error) -> Self {
        Self::Hardware(err.to_string())
    }
}
