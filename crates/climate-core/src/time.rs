//! Countdown timers and session generations
//!
//! Engines never own a real clock. The host delivers one tick per second,
//! stamped with the [`Generation`] that was current when the timer started.
//! A session bumps its generation whenever it restarts, quits or re-arms a
//! timer, so ticks and scheduled messages from an older generation fall
//! through as no-ops instead of mutating a discarded session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Whole seconds on a countdown
pub type Seconds = u32;

/// Interval between countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Monotonic session/timer identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    /// The initial generation
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The generation after this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Bump in place and return the new generation
    pub fn bump(&mut self) -> Self {
        *self = self.next();
        *self
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen:{}", self.0)
    }
}

/// Outcome of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Still counting; seconds left after this tick
    Running(Seconds),
    /// This tick took the countdown to zero
    Expired,
    /// The countdown was not running
    Stopped,
}

/// A whole-second countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration: Seconds,
    remaining: Seconds,
    running: bool,
}

impl Countdown {
    /// Create a stopped countdown that will run for `duration` seconds
    pub fn new(duration: Seconds) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Reset to the full duration and start running
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Stop without changing the remaining time
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Seconds left
    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the duration still left, in `[0, 1]`
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            self.remaining as f64 / self.duration as f64
        }
    }

    /// Advance by one second
    pub fn tick(&mut self) -> CountdownStatus {
        if !self.running {
            return CountdownStatus::Stopped;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running(self.remaining)
        }
    }
}
