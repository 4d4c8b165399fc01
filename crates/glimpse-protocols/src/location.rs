//! The fallback tab's addressable location.
//!
//! When no panel can be opened, the relay hands the original text to a
//! fallback surface through its location: a percent-encoded query string
//! carrying `original` (always present when valid) and optionally one of
//! `summary` or `error`.

use url::form_urlencoded;

use crate::error::SurfaceError;

/// A pre-resolved outcome carried alongside the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabOutcome {
    Summary(String),
    Error(String),
}

/// The addressable location handed to a fallback tab surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLocation {
    /// The selected text, un-encoded.
    pub original: String,
    /// A pre-resolved summary or error, when the relay already has one.
    /// Absent in the usual fallback flow, where the tab requests its own
    /// summary.
    pub outcome: Option<TabOutcome>,
}

impl TabLocation {
    /// A location carrying only the original text.
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            outcome: None,
        }
    }

    /// A location with a pre-resolved summary.
    pub fn with_summary(original: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            outcome: Some(TabOutcome::Summary(summary.into())),
        }
    }

    /// A location with a pre-resolved error.
    pub fn with_error(original: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            outcome: Some(TabOutcome::Error(error.into())),
        }
    }

    /// Render the percent-encoded query string.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("original", &self.original);
        match &self.outcome {
            Some(TabOutcome::Summary(summary)) => {
                serializer.append_pair("summary", summary);
            }
            Some(TabOutcome::Error(error)) => {
                serializer.append_pair("error", error);
            }
            None => {}
        }
        serializer.finish()
    }

    /// Parse a query string back into a location.
    ///
    /// `original` is required; a location without it is not actionable and
    /// surfaces as a user-facing error, never a panic. Unknown pairs are
    /// ignored. If both `summary` and `error` are somehow present, the
    /// error wins.
    pub fn parse(query: &str) -> Result<Self, SurfaceError> {
        let mut original = None;
        let mut summary = None;
        let mut error = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "original" => original = Some(value.into_owned()),
                "summary" => summary = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        let original = original.ok_or(SurfaceError::MissingOriginalText)?;
        let outcome = match (error, summary) {
            (Some(e), _) => Some(TabOutcome::Error(e)),
            (None, Some(s)) => Some(TabOutcome::Summary(s)),
            (None, None) => None,
        };

        Ok(Self { original, outcome })
    }
}

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
