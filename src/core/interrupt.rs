//! Cooperative cancellation for the game worker.
//!
//! Threads cannot be interrupted from the outside, so every blocking wait in
//! a game loop or listener goes through [`CancelToken::sleep`], which wakes
//! early and reports [`GameError::Interrupted`] once the token is cancelled.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::GameError;

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel, waking every thread blocked in [`sleep`](Self::sleep).
    pub fn cancel(&self) {
        let mut cancelled = self.inner.cancelled.lock();
        *cancelled = true;
        self.inner.wake.notify_all();
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Block for `duration` unless cancelled first.
    pub fn sleep(&self, duration: Duration) -> Result<(), GameError> {
        let deadline = Instant::now() + duration;
        let mut cancelled = self.inner.cancelled.lock();
        while !*cancelled {
            if self.inner.wake.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        if *cancelled {
            Err(GameError::Interrupted)
        } else {
            Ok(())
        }
    }
}
