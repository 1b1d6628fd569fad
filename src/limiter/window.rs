//! Sliding Window Rate Limiter
//!
//! Counts each identity's requests inside a trailing time window.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::time::Instant;

use crate::limiter::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};

/// Request timestamps per identity, oldest first.
pub type RequestLog = HashMap<String, VecDeque<Instant>>;

// == Rate Limiter ==
/// Per-identity sliding-window request counter.
///
/// Checking and recording are separate steps: [`RateLimiter::is_limited`]
/// only prunes and counts, the caller decides when to [`RateLimiter::record`].
#[derive(Debug)]
pub struct RateLimiter {
    log: RequestLog,
    window: Duration,
    max_requests: usize,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter with an empty request log.
    ///
    /// # Arguments
    /// * `window` - Length of the trailing window
    /// * `max_requests` - Requests per identity at which checks report limited
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            log: HashMap::new(),
            window,
            max_requests,
        }
    }

    // == Is Limited ==
    /// Prunes `identity`'s timestamps to those strictly inside the window
    /// and reports whether the remaining count has reached the threshold.
    ///
    /// The pruned list is kept even when the answer is true. Unknown
    /// identities are never limited and are not added to the log.
    pub fn is_limited(&mut self, identity: &str) -> bool {
        let now = Instant::now();
        let window = self.window;

        let Some(timestamps) = self.log.get_mut(identity) else {
            return false;
        };

        // Appends are in clock order, so stale entries sit at the front.
        while let Some(oldest) = timestamps.front() {
            if now.saturating_duration_since(*oldest) < window {
                break;
            }
            timestamps.pop_front();
        }

        timestamps.len() >= self.max_requests
    }

    // == Record ==
    /// Logs a request for `identity` at the current time.
    pub fn record(&mut self, identity: &str) {
        let now = Instant::now();
        match self.log.get_mut(identity) {
            Some(timestamps) => timestamps.push_back(now),
            None => {
                self.log.insert(identity.to_string(), VecDeque::from([now]));
            }
        }
    }

    /// Number of timestamps currently held for `identity`, stale ones included
    /// until the next check prunes them.
    pub fn request_count(&self, identity: &str) -> usize {
        self.log.get(identity).map_or(0, VecDeque::len)
    }

    /// Number of identities with a log entry.
    pub fn tracked_identities(&self) -> usize {
        self.log.len()
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Threshold at which an identity is limited.
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_REQUESTS)
    }
}
