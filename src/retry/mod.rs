//! Retry Module
//!
//! Exponential backoff execution wrapper for unreliable downstream calls.

mod executor;
mod policy;

pub use executor::{with_retry, with_retry_if};
pub use policy::{
    Delays, RetryConfig, DEFAULT_BACKOFF_FACTOR, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_DELAY,
};
