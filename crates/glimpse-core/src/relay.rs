//! The relay: coordination between selections, the summarizer, and the
//! shared session.

use std::sync::Arc;

use tracing::{debug, error, warn};

use glimpse_protocols::error::RelayError;
use glimpse_protocols::{SessionState, Summarizer, SurfaceReply, SurfaceRequest, TabLocation};
use glimpse_store::SessionStore;

use crate::panel::PanelHost;
use crate::selection::{PanelTarget, SelectionEvent};

/// Which surface a selection was routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRoute {
    /// A panel opened; the session lives in the shared store and passive
    /// surfaces observe it there.
    Panel { target: PanelTarget },
    /// No panel could open; the original text travels in the location and
    /// the fallback tab requests its own summary.
    Fallback { location: TabLocation },
}

/// The single coordination point for summarization.
///
/// Only the relay writes the session record, one triggering user action at
/// a time; concurrent triggers are an accepted last-write-wins race (no
/// cancellation, no ordering guarantee beyond "last resolution observed
/// wins").
pub struct Relay {
    session: SessionStore,
    summarizer: Arc<dyn Summarizer>,
    panels: Arc<dyn PanelHost>,
}

impl Relay {
    pub fn new(
        session: SessionStore,
        summarizer: Arc<dyn Summarizer>,
        panels: Arc<dyn PanelHost>,
    ) -> Self {
        Self {
            session,
            summarizer,
            panels,
        }
    }

    /// Entry A: a selection-triggered summarization intent.
    ///
    /// Attempts the panel first. On success the session is seeded loading
    /// and the summary resolves into the store in the background. On
    /// failure any prior session is cleared and the text is handed back as
    /// a fallback location; no summarization starts on that path.
    pub async fn handle_selection(
        self: &Arc<Self>,
        event: SelectionEvent,
    ) -> Result<SessionRoute, RelayError> {
        let Some(target) = event.panel_target() else {
            warn!("cannot open side panel, valid tab or window information is missing");
            return Err(RelayError::NoDisplayTarget);
        };

        match self.panels.open(target).await {
            Ok(()) => {
                debug!("side panel opened for {target}");
                self.session
                    .seed_session(&SessionState::seeded(&event.text))
                    .await?;

                let relay = Arc::clone(self);
                let text = event.text;
                tokio::spawn(async move {
                    relay.resolve_panel_session(&text).await;
                });

                Ok(SessionRoute::Panel { target })
            }
            Err(err) => {
                // Expected for restricted contexts such as PDF viewers;
                // proceed with the new-tab fallback.
                warn!("side panel open failed for {target}: {err}; falling back to a new tab");
                self.session.clear_session().await?;
                Ok(SessionRoute::Fallback {
                    location: TabLocation::new(event.text),
                })
            }
        }
    }

    /// Resolve one panel session. A resolved summary overwrites the
    /// placeholder; a resolved failure lands in the session's error field
    /// with the placeholder untouched; a store-write failure (the one
    /// orchestration error left on this path) records the fixed failure
    /// summary. On every path the loading flag is cleared exactly once.
    async fn resolve_panel_session(&self, text: &str) {
        let outcome = match self.summarizer.try_summarize(text).await {
            Ok(summary) => self.session.complete_session(&summary).await,
            Err(kind) => self.session.record_attempt_error(&kind.display_text()).await,
        };
        if let Err(err) = outcome {
            error!("failed to store summarization outcome: {err}");
            let message = err.to_string();
            if let Err(err) = self.session.fail_session(&message).await {
                error!("failed to record session failure: {err}");
            }
        }
    }

    /// Entry B: an explicit one-shot request from a surface. Exactly one
    /// reply; no session mutation.
    pub async fn handle_request(&self, request: SurfaceRequest) -> SurfaceReply {
        match request {
            SurfaceRequest::GetSummary { text_to_summarize } => {
                debug!(
                    "getSummary request for {} chars",
                    text_to_summarize.len()
                );
                SurfaceReply::result(self.summarizer.summarize(&text_to_summarize).await)
            }
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
