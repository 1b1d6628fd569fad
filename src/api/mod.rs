//! API Module
//!
//! HTTP handlers, middleware and routing for the guard server.
//!
//! # Endpoints
//! - `POST /check` - Fact-check a text (rate limited, cached, retried)
//! - `GET /stats` - Get cache and limiter statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{client_identity, rate_limit};
pub use routes::create_router;
