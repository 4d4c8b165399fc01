//! The Gemini-backed summarization client.

use async_trait::async_trait;
use tracing::debug;

use glimpse_protocols::error::SummarizeError;
use glimpse_protocols::Summarizer;
use glimpse_store::SessionStore;

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Selections shorter than this (after trimming) are rejected without a
/// network call.
const MIN_SELECTION_CHARS: usize = 10;

/// Gemini summarizer.
///
/// The credential and the prompt template are read from the store on every
/// call, never cached; a key or template saved by any surface takes effect
/// on the next request.
pub struct GeminiSummarizer {
    client: GeminiClient,
    session: SessionStore,
    min_selection_chars: usize,
}

impl GeminiSummarizer {
    /// Create a new summarizer over the given endpoint base and model.
    pub fn new(
        session: SessionStore,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: GeminiClient::new(base_url, model),
            session,
            min_selection_chars: MIN_SELECTION_CHARS,
        }
    }

    /// Override the minimum selection length.
    pub fn with_min_selection_chars(mut self, min: usize) -> Self {
        self.min_selection_chars = min;
        self
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn try_summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let api_key = self
            .session
            .credential()
            .await
            .map_err(|e| SummarizeError::Store(e.to_string()))?
            .ok_or(SummarizeError::MissingCredential)?;

        if text.trim().chars().count() < self.min_selection_chars {
            return Err(SummarizeError::TooShort);
        }

        let prompt = self
            .session
            .prompt_template()
            .await
            .map_err(|e| SummarizeError::Store(e.to_string()))?;

        debug!("summarizing {} chars", text.len());

        let request = GenerateContentRequest::single_text(format!("{prompt}\n\n{text}"));
        let response = self.client.generate_content(&api_key, request).await?;

        match response.first_text() {
            Some(summary) => Ok(summary.trim().to_string()),
            None => Err(SummarizeError::Malformed),
        }
    }
}

#[cfg(test)]
#[path = "summarizer_tests.rs"]
mod tests;
