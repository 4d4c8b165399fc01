//! The shared render model.

use glimpse_protocols::session::SUMMARY_IN_PROGRESS;
use glimpse_protocols::{SessionPhase, SessionState, SurfaceReply, TabLocation, TabOutcome};

const NO_SELECTION_HINT: &str = "(No text selected yet)";
const NO_SUMMARY_HINT: &str = "(Summary not available yet)";

/// What a surface shows: the original text and one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub original: String,
    pub status: ViewStatus,
}

/// The single status a view renders. Mirrors the session phase precedence:
/// loading wins over failure wins over summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Failure(String),
    Summary(String),
}

impl SessionView {
    /// Build from the shared session record (passive surfaces).
    pub fn from_state(state: &SessionState) -> Self {
        let status = match state.phase() {
            SessionPhase::Loading => ViewStatus::Loading,
            SessionPhase::Failed(error) => ViewStatus::Failure(error.to_string()),
            SessionPhase::Ready(summary) => ViewStatus::Summary(summary.to_string()),
            SessionPhase::Empty => ViewStatus::Summary(String::new()),
        };
        Self {
            original: state.selected_text.clone(),
            status,
        }
    }

    /// Build from a direct relay reply (fallback tab).
    pub fn from_reply(original: impl Into<String>, reply: &SurfaceReply) -> Self {
        let status = match reply {
            SurfaceReply::Result { result } => ViewStatus::Summary(result.clone()),
            SurfaceReply::Error { error } => ViewStatus::Failure(error.clone()),
        };
        Self {
            original: original.into(),
            status,
        }
    }

    /// Build from a fallback location before any request has been made.
    pub fn from_location(location: &TabLocation) -> Self {
        let status = match &location.outcome {
            Some(TabOutcome::Summary(summary)) => ViewStatus::Summary(summary.clone()),
            Some(TabOutcome::Error(error)) => ViewStatus::Failure(error.clone()),
            None => ViewStatus::Summary(String::new()),
        };
        Self {
            original: location.original.clone(),
            status,
        }
    }

    /// The plain-text rendition every surface kind shows.
    pub fn render_text(&self) -> String {
        let original = if self.original.is_empty() {
            NO_SELECTION_HINT
        } else {
            &self.original
        };
        let body = match &self.status {
            ViewStatus::Loading => SUMMARY_IN_PROGRESS.to_string(),
            ViewStatus::Failure(error) => format!("Error: {error}"),
            ViewStatus::Summary(summary) if summary.is_empty() => NO_SUMMARY_HINT.to_string(),
            ViewStatus::Summary(summary) => summary.clone(),
        };
        format!("Original text:\n{original}\n\nSummary:\n{body}\n")
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
