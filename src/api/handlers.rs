//! API Handlers
//!
//! HTTP request handlers for each guard server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{GuardError, Result, UpstreamError};
use crate::limiter::RateLimiter;
use crate::models::{CheckRequest, CheckResponse, HealthResponse, StatsResponse};
use crate::retry::{with_retry, RetryConfig};
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// The cache and the limiter are mutated on reads (lazy eviction, pruning),
/// so both sit behind their own write-locked `Arc<RwLock<_>>`.
#[derive(Clone)]
pub struct AppState {
    /// Fact-check results keyed by normalized text
    pub cache: Arc<RwLock<TtlCache<Value>>>,
    /// Per-client request log
    pub limiter: Arc<RwLock<RateLimiter>>,
    /// Backend the guard protects
    pub upstream: UpstreamClient,
    /// Retry policy for backend calls
    pub retry: RetryConfig,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: TtlCache<Value>,
        limiter: RateLimiter,
        upstream: UpstreamClient,
        retry: RetryConfig,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RwLock::new(limiter)),
            upstream,
            retry,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout())?;
        Ok(Self::new(
            TtlCache::new(config.cache_ttl()),
            RateLimiter::new(config.rate_limit_window(), config.rate_limit_max_requests),
            upstream,
            config.retry.clone(),
        ))
    }
}

/// Handler for POST /check
///
/// Serves a cached verdict when one is fresh; otherwise asks the backend,
/// retrying with backoff, and caches the answer. Body extraction failures
/// are reported in the same `{ "error": ... }` shape as every other error.
pub async fn check_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(GuardError::InvalidRequest(error_msg));
    }
    let key = req.cache_key();

    // Guard is released before the backend call
    let cached = state.cache.write().await.get(key);
    if let Some(result) = cached {
        debug!("serving cached verdict");
        return Ok(Json(CheckResponse::new(result, true)));
    }

    let upstream = &state.upstream;
    let result = with_retry(|| upstream.check(key), &state.retry)
        .await
        .map_err(|err| {
            warn!(error = %err, url = upstream.url(), "upstream check failed on every attempt");
            GuardError::from(err)
        })?;

    state.cache.write().await.set(key, result.clone());

    Ok(Json(CheckResponse::new(result, false)))
}

/// Handler for GET /stats
///
/// Returns cache statistics and the number of rate-limited identities tracked.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    let tracked = state.limiter.read().await.tracked_identities();

    Json(StatsResponse::new(&stats, tracked))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
