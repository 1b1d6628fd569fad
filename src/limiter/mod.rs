//! Rate Limiter Module
//!
//! Sliding-window admission control keyed by an opaque identity string.

mod window;

pub use window::{RateLimiter, RequestLog};

use std::time::Duration;

// == Public Constants ==
/// Trailing window used by `RateLimiter::default`
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Threshold used by `RateLimiter::default`
pub const DEFAULT_MAX_REQUESTS: usize = 10;
