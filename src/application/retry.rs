//! Retry policy for upstream calls.
//!
//! The policy only decides *how long to wait* and *how many times*; which failures are
//! retried is decided by the caller (transient provider errors only).

use std::time::Duration;
use tokio_retry::strategy::{ExponentialBackoff, FixedInterval};

/// Default number of attempts, first call included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 200;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 2000;

/// Bounded retry with fixed or exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    exponential: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
            Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
            true,
        )
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` counts the first call; values below 1 are raised to 1.
    pub fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        exponential: bool,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff,
            exponential,
        }
    }

    /// Same delay between every attempt.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, delay, delay, false)
    }

    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delays to wait before each retry. Yields `max_attempts - 1` items.
    ///
    /// Exponential backoff doubles from `initial_backoff` and is capped at `max_backoff`.
    pub fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        let retries = (self.max_attempts - 1) as usize;

        if self.exponential {
            // from_millis(2).factor(f) yields 2f, 4f, 8f, ... so everything is halved.
            let factor = self.initial_backoff.as_millis() as u64;
            Box::new(
                ExponentialBackoff::from_millis(2)
                    .factor(factor)
                    .max_delay(self.max_backoff.saturating_mul(2))
                    .map(|delay| delay / 2)
                    .take(retries),
            )
        } else {
            Box::new(FixedInterval::new(self.initial_backoff).take(retries))
        }
    }
}
