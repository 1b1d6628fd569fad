//! Fact-check Guard - resilience primitives for an AI fact-checking endpoint
//!
//! Provides a TTL cache, a retry-with-backoff executor and a sliding-window
//! rate limiter, plus an HTTP front that composes them around a backend.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod retry;
pub mod upstream;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use limiter::RateLimiter;
pub use retry::{with_retry, with_retry_if, RetryConfig};
