//! API Routes
//!
//! Configures the Axum router with all guard server endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{check_handler, health_handler, stats_handler, AppState};
use super::middleware::rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /check` - Fact-check a text, behind the rate limiter
/// - `GET /stats` - Get cache and limiter statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Rate limiting: only on `/check`, keyed by `X-Forwarded-For`
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let guarded = Router::new()
        .route("/check", post(check_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(guarded)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::limiter::RateLimiter;
    use crate::retry::RetryConfig;
    use crate::upstream::UpstreamClient;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app(max_requests: usize) -> Router {
        let upstream =
            UpstreamClient::new("http://127.0.0.1:9/check", Duration::from_millis(200)).unwrap();
        let state = AppState::new(
            TtlCache::with_ttl_minutes(60),
            RateLimiter::new(Duration::from_secs(60), max_requests),
            upstream,
            RetryConfig::default().with_max_attempts(1),
        );
        create_router(state)
    }

    fn check_request(client: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/check")
            .header("content-type", "application/json")
            .header("x-forwarded-for", client)
            .body(Body::from(r#"{"text":"   "}"#))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(10);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_not_rate_limited() {
        let app = create_test_app(0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_check_rate_limited_after_threshold() {
        let app = create_test_app(2);

        for _ in 0..2 {
            let response = app.clone().oneshot(check_request("198.51.100.1")).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let response = app.oneshot(check_request("198.51.100.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
