//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_MINUTES;
use crate::limiter::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
use crate::retry::RetryConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of cached results in minutes
    pub cache_ttl_minutes: u64,
    /// Rate limiter trailing window in seconds
    pub rate_limit_window_secs: u64,
    /// Requests allowed per identity inside the window
    pub rate_limit_max_requests: usize,
    /// Attempt budget and backoff for upstream calls
    pub retry: RetryConfig,
    /// Fact-checking backend endpoint
    pub upstream_url: String,
    /// Per-request timeout for the backend, in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_MINUTES` - Cached result lifetime (default: 60)
    /// - `RATE_LIMIT_WINDOW_SECS` - Sliding window length (default: 60)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 10)
    /// - `RETRY_MAX_ATTEMPTS` - Upstream attempts (default: 3)
    /// - `RETRY_INITIAL_DELAY_MS` - First backoff delay (default: 1000)
    /// - `RETRY_MAX_DELAY_MS` - Backoff cap (default: 10000)
    /// - `RETRY_BACKOFF_FACTOR` - Backoff multiplier (default: 2.0)
    /// - `UPSTREAM_URL` - Backend endpoint (default: http://127.0.0.1:8000/check)
    /// - `UPSTREAM_TIMEOUT_SECS` - Backend request timeout (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl_minutes: env_or("CACHE_TTL_MINUTES", defaults.cache_ttl_minutes),
            rate_limit_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", defaults.rate_limit_window_secs),
            rate_limit_max_requests: env_or(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            ),
            retry: RetryConfig {
                max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.retry.max_attempts),
                initial_delay: Duration::from_millis(env_or(
                    "RETRY_INITIAL_DELAY_MS",
                    defaults.retry.initial_delay.as_millis() as u64,
                )),
                max_delay: Duration::from_millis(env_or(
                    "RETRY_MAX_DELAY_MS",
                    defaults.retry.max_delay.as_millis() as u64,
                )),
                backoff_factor: env_or("RETRY_BACKOFF_FACTOR", defaults.retry.backoff_factor),
            },
            upstream_url: env::var("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs),
        }
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes.saturating_mul(60))
    }

    /// Rate limiter window as a `Duration`.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Backend request timeout as a `Duration`.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl_minutes: DEFAULT_TTL_MINUTES,
            rate_limit_window_secs: DEFAULT_WINDOW.as_secs(),
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            retry: RetryConfig::default(),
            upstream_url: "http://127.0.0.1:8000/check".to_string(),
            upstream_timeout_secs: 30,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when the
/// variable is unset or unparseable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
