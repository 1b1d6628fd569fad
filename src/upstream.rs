//! Upstream Client
//!
//! The downstream call the guard protects: one POST of the text to the
//! fact-checking backend, whose JSON answer is passed through untouched.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::UpstreamError;

#[derive(Serialize)]
struct CheckPayload<'a> {
    text: &'a str,
}

// == Upstream Client ==
/// HTTP client bound to the fact-checking backend.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    /// Creates a client posting to `url`, each request bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The backend endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    // == Check ==
    /// Sends `text` once. Non-2xx statuses and non-JSON bodies are errors.
    pub async fn check(&self, text: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .json(&CheckPayload { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
