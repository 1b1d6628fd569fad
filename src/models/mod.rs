//! Request and Response models for the guard server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CheckRequest, MAX_TEXT_LENGTH};
pub use responses::{CheckResponse, HealthResponse, StatsResponse};
