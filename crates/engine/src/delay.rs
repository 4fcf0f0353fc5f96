//! Simulated processing time
//!
//! Workers pause after each action for a duration drawn uniformly from an
//! inclusive millisecond range. The pause is a plain `thread::sleep`; it is
//! not cancellable.

use lockwise_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Inclusive range of pause lengths in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Shortest pause
    pub min_ms: u64,
    /// Longest pause
    pub max_ms: u64,
}

impl DelayRange {
    /// Range `[min_ms, max_ms]`
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        DelayRange { min_ms, max_ms }
    }

    /// Always pause exactly `ms`
    pub const fn fixed(ms: u64) -> Self {
        DelayRange::new(ms, ms)
    }

    /// Never pause
    pub const fn none() -> Self {
        DelayRange::new(0, 0)
    }

    /// Reject ranges whose bounds are swapped
    pub fn validate(&self, field: &str) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(Error::invalid_config(format!(
                "{}: min_ms ({}) is greater than max_ms ({})",
                field, self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }

    /// Draw a pause length
    ///
    /// An invalid range degrades to `min_ms` instead of panicking.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    /// Draw a pause length and sleep for it
    pub fn pause<R: Rng + ?Sized>(&self, rng: &mut R) {
        let pause = self.sample(rng);
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}
