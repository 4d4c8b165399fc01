//! The summarization client trait seam.

use async_trait::async_trait;

use crate::error::SummarizeError;

/// A remote summarization client.
///
/// Implementations perform at most one outbound request per call and map
/// every failure to a [`SummarizeError`] kind. Callers at a display
/// boundary use [`Summarizer::summarize`], which upholds the contract that
/// summarization always produces displayable text and never an unhandled
/// failure.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`, exposing the failure kind to the caller.
    async fn try_summarize(&self, text: &str) -> Result<String, SummarizeError>;

    /// Summarize `text`, resolving every outcome to a displayable string.
    async fn summarize(&self, text: &str) -> String {
        match self.try_summarize(text).await {
            Ok(summary) => summary,
            Err(err) => err.display_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSummarizer(Result<String, SummarizeError>);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn try_summarize(&self, _text: &str) -> Result<String, SummarizeError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_summarize_passes_through_success() {
        let summarizer = FixedSummarizer(Ok("a summary".to_string()));
        assert_eq!(summarizer.summarize("text").await, "a summary");
    }

    #[tokio::test]
    async fn test_summarize_renders_error_kinds_as_text() {
        let summarizer = FixedSummarizer(Err(SummarizeError::TooShort));
        assert_eq!(
            summarizer.summarize("text").await,
            "Selected text is too short for summarization."
        );
    }
}
