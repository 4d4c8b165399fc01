//! Gemini API client.

use reqwest::Client;
use tracing::{debug, warn};

use glimpse_protocols::error::SummarizeError;

use crate::types::{GeminiError, GenerateContentRequest, GenerateContentResponse};

/// Gemini API client. One attempt per call, no retries; transient errors
/// surface exactly like permanent ones.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given endpoint base and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// The model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue one `generateContent` call with the credential as a query
    /// parameter.
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, SummarizeError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        debug!("Gemini generate_content: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        if !status.is_success() {
            // The error body is diagnostics only; the user-facing string
            // carries the status code and reason.
            match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => warn!("Gemini API error {}: {}", e.error.code, e.error.message),
                Err(_) => warn!("Gemini API error {}: {}", status.as_u16(), body.trim()),
            }
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| SummarizeError::Network(format!("invalid JSON in API response: {e}")))?;
        serde_json::from_value(value).map_err(|_| SummarizeError::Malformed)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
