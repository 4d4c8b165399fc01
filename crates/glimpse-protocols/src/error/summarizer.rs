//! Summarization client errors.
//!
//! The [`SummarizeError`] kinds are inspectable by tests and the relay; the
//! user-facing rendition of each kind is [`SummarizeError::display_text`],
//! which is the only form that crosses a display boundary.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("selected text is below the minimum length")]
    TooShort,

    #[error("API error: {status} - {reason}")]
    Api { status: u16, reason: String },

    #[error("response did not contain a summary")]
    Malformed,

    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Store(String),
}

impl SummarizeError {
    /// The fixed, human-readable string this kind resolves to at the
    /// display boundary. Every kind maps to displayable text; none escape
    /// as failures.
    pub fn display_text(&self) -> String {
        match self {
            Self::MissingCredential => {
                "API key not configured. Please set it before requesting a summary.".to_string()
            }
            Self::TooShort => "Selected text is too short for summarization.".to_string(),
            Self::Api { status, reason } => format!(
                "Error during summarization: API request failed with status {status}: {reason}"
            ),
            Self::Malformed => "Could not extract summary from API response.".to_string(),
            Self::Network(message) | Self::Store(message) => {
                format!("Error during summarization: {message}")
            }
        }
    }
}
