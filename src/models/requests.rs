//! Request DTOs for the guard server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum accepted text length in bytes, after trimming
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Request body for `POST /check`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    /// The text to fact-check
    pub text: String,
}

impl CheckRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let text = self.text.trim();
        if text.is_empty() {
            return Some("Text cannot be empty".to_string());
        }
        if text.len() > MAX_TEXT_LENGTH {
            return Some(format!(
                "Text exceeds maximum length of {} bytes",
                MAX_TEXT_LENGTH
            ));
        }
        None
    }

    /// Cache key for this request: the text with surrounding whitespace removed.
    pub fn cache_key(&self) -> &str {
        self.text.trim()
    }
}
