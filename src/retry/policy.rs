//! Retry Policy
//!
//! Attempt budget and exponential backoff schedule.

use std::time::Duration;

// == Defaults ==
/// Attempts made by `RetryConfig::default`
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Delay before the first retry
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
/// Cap on any single delay
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);
/// Delay multiplier between retries
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

// == Retry Config ==
/// Per-invocation retry settings supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, the first one included. Zero acts as one.
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryConfig {
    /// Sets the total attempt budget, the first attempt included.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay slept before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the upper bound applied to every delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the multiplier applied to the delay after each retry.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Number of attempts actually made, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the first retry, capped by `max_delay`.
    pub fn first_delay(&self) -> Duration {
        self.initial_delay.min(self.max_delay)
    }

    // == Next Delay ==
    /// Grows `current` by the backoff factor and caps it at `max_delay`.
    ///
    /// A product that is not representable as a `Duration` (overflow, NaN,
    /// negative factor) resolves to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let nanos = current.as_nanos() as f64 * self.backoff_factor;
        if nanos.is_finite() && nanos >= 0.0 && nanos < u64::MAX as f64 {
            Duration::from_nanos(nanos as u64).min(self.max_delay)
        } else {
            self.max_delay
        }
    }

    // == Delay Schedule ==
    /// The delays slept between attempts when every attempt fails.
    ///
    /// Yields `attempts() - 1` values: `initial_delay`, then each previous
    /// delay times `backoff_factor`, all clamped to `max_delay`.
    pub fn delays(&self) -> Delays<'_> {
        Delays {
            config: self,
            next: self.first_delay(),
            remaining: self.attempts() - 1,
        }
    }
}

/// Iterator over a [`RetryConfig`]'s backoff schedule.
#[derive(Debug, Clone)]
pub struct Delays<'a> {
    config: &'a RetryConfig,
    next: Duration,
    remaining: u32,
}

impl Iterator for Delays<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let delay = self.next;
        self.next = self.config.next_delay(delay);
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Delays<'_> {}
