//! Rate Limit Middleware
//!
//! Admits or rejects each request based on its client identity.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::error::{GuardError, Result};

/// Header carrying the originating client address behind a proxy
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Identity used when the client address is unknown
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Derives the rate-limit identity: the first `X-Forwarded-For` hop, or
/// [`UNKNOWN_IDENTITY`] when the header is missing, unreadable or blank.
pub fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string()
}

/// Checks the client against the limiter, then records the admitted request.
///
/// Check and record happen under one write guard so concurrent requests
/// from the same client cannot both slip under the threshold.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let identity = client_identity(request.headers());

    let limited = {
        let mut limiter = state.limiter.write().await;
        let limited = limiter.is_limited(&identity);
        if !limited {
            limiter.record(&identity);
        }
        limited
    };

    if limited {
        warn!(client = %identity, "Rate limit exceeded");
        return Err(GuardError::RateLimited(identity));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_identity_from_single_hop() {
        assert_eq!(client_identity(&headers_with("203.0.113.7")), "203.0.113.7");
    }

    #[test]
    fn test_identity_uses_first_hop() {
        let headers = headers_with(" 203.0.113.7 , 10.0.0.2, 10.0.0.3");
        assert_eq!(client_identity(&headers), "203.0.113.7");
    }

    #[test]
    fn test_identity_defaults_to_unknown() {
        assert_eq!(client_identity(&HeaderMap::new()), UNKNOWN_IDENTITY);
        assert_eq!(client_identity(&headers_with("  ")), UNKNOWN_IDENTITY);
    }
}
