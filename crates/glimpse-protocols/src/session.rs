//! Session state: the persisted record of the current summarization attempt.
//!
//! ## Core Concepts
//!
//! - **Session State**: one record per device, seeded when a selection
//!   triggers summarization, mutated once more when the attempt resolves
//! - **Phase precedence**: loading wins over error wins over summary, so a
//!   surface observing mid-write storage never renders two states at once
//!
//! The record is persisted as flat keys (see [`keys`]) rather than a nested
//! document, matching the external storage contract.

use serde::{Deserialize, Serialize};

/// Built-in prompt template used whenever no custom template is stored.
pub const DEFAULT_PROMPT: &str = "Summarize the following text:";

/// Placeholder summary written while a request is in flight.
pub const SUMMARY_IN_PROGRESS: &str = "Summarizing...";

/// Fixed summary written when the orchestration layer itself fails.
pub const SUMMARY_FAILED: &str = "Failed to summarize.";

/// Flat storage key names. Local-scope keys hold the session record and the
/// credential; the synchronized scope holds the prompt template.
pub mod keys {
    /// Local scope: the API credential.
    pub const API_KEY: &str = "geminiApiKey";
    /// Local scope: text captured at the triggering user action.
    pub const SELECTED_TEXT: &str = "selectedText";
    /// Local scope: last known summary, status message, or error text.
    pub const SUMMARY_TEXT: &str = "summaryText";
    /// Local scope: true strictly between dispatch and resolution.
    pub const IS_LOADING: &str = "isLoading";
    /// Local scope: present only when the last attempt failed.
    pub const ERROR: &str = "error";
    /// Synchronized scope: the user-editable prompt template.
    pub const CUSTOM_PROMPT: &str = "customPrompt";

    /// The four keys that make up the session record.
    pub const SESSION: [&str; 4] = [SELECTED_TEXT, SUMMARY_TEXT, IS_LOADING, ERROR];
}

/// The current summarization session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Text captured at the moment of the triggering user action.
    pub selected_text: String,
    /// Last known summary, status message, or error-derived text.
    pub summary_text: String,
    /// True strictly between request dispatch and resolution.
    pub is_loading: bool,
    /// Present only when the last attempt failed.
    pub error: Option<String>,
}

impl SessionState {
    /// The state written when a panel session begins: loading, placeholder
    /// summary, no error.
    pub fn seeded(selected_text: impl Into<String>) -> Self {
        Self {
            selected_text: selected_text.into(),
            summary_text: SUMMARY_IN_PROGRESS.to_string(),
            is_loading: true,
            error: None,
        }
    }

    /// Which single reading of the record is meaningful right now.
    ///
    /// Exactly one of {loading, failed, ready} holds at any observed
    /// instant; surfaces render through this so the precedence is decided
    /// once, not per renderer.
    pub fn phase(&self) -> SessionPhase<'_> {
        if self.is_loading {
            SessionPhase::Loading
        } else if let Some(error) = self.error.as_deref() {
            SessionPhase::Failed(error)
        } else if !self.summary_text.is_empty() {
            SessionPhase::Ready(&self.summary_text)
        } else {
            SessionPhase::Empty
        }
    }

    /// True when no session has been recorded (all fields at rest).
    pub fn is_empty(&self) -> bool {
        !self.is_loading
            && self.error.is_none()
            && self.selected_text.is_empty()
            && self.summary_text.is_empty()
    }
}

/// The single meaningful reading of a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase<'a> {
    /// No session recorded yet.
    Empty,
    /// A request is in flight.
    Loading,
    /// The last attempt failed; the payload is the error text.
    Failed(&'a str),
    /// The last attempt completed; the payload is the summary text.
    Ready(&'a str),
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
