//! One-shot request/reply messages between a display surface and the relay.
//!
//! The wire shape is fixed: requests are tagged by an `action` field and the
//! reply carries either a `result` or an `error`, never both.

use serde::{Deserialize, Serialize};

/// A directed request from a display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum SurfaceRequest {
    /// Ask the relay for a one-shot summary of the given text.
    #[serde(rename = "getSummary", rename_all = "camelCase")]
    GetSummary { text_to_summarize: String },
}

impl SurfaceRequest {
    /// Build a `getSummary` request.
    pub fn get_summary(text: impl Into<String>) -> Self {
        Self::GetSummary {
            text_to_summarize: text.into(),
        }
    }
}

/// The relay's single reply to a [`SurfaceRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurfaceReply {
    /// The resolved summary (or a resolved failure string - the client
    /// contract always produces displayable text).
    Result { result: String },
    /// An orchestration-level failure: the relay itself could not service
    /// the request. Distinct from a resolved failure string in `Result`.
    Error { error: String },
}

impl SurfaceReply {
    /// Build a successful reply.
    pub fn result(text: impl Into<String>) -> Self {
        Self::Result {
            result: text.into(),
        }
    }

    /// Build an orchestration-failure reply with the fixed prefix.
    pub fn orchestration_failure(message: impl std::fmt::Display) -> Self {
        Self::Error {
            error: format!("Background summarization failed: {message}"),
        }
    }

    /// The displayable text of the reply, whichever side it carries.
    pub fn text(&self) -> &str {
        match self {
            Self::Result { result } => result,
            Self::Error { error } => error,
        }
    }

    /// True for the orchestration-failure side.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
