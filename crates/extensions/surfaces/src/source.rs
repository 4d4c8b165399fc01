//! Data sources feeding the shared view.

use tokio::sync::broadcast;
use tracing::debug;

use glimpse_protocols::error::{StoreError, SurfaceError};
use glimpse_protocols::session::keys;
use glimpse_protocols::{SurfaceRequest, TabLocation};
use glimpse_core::RelayHandle;
use glimpse_store::{SessionStore, StoreChange, StoreScope};

use crate::view::SessionView;

/// The passive data source used by the popup and the side panel.
///
/// One synchronous read on activation, then a re-read on every local-scope
/// change touching the session keys - the only mechanism propagating relay
/// results to an already-open surface.
pub struct StoreSource {
    session: SessionStore,
    rx: broadcast::Receiver<StoreChange>,
}

impl StoreSource {
    pub fn new(session: SessionStore) -> Self {
        let rx = session.subscribe();
        Self { session, rx }
    }

    /// The view as of now.
    pub async fn current(&self) -> Result<SessionView, StoreError> {
        let state = self.session.session().await?;
        Ok(SessionView::from_state(&state))
    }

    /// Wait for the next session change and return the re-read view.
    /// Changes in other scopes or to other keys are skipped. `None` when
    /// the store is gone.
    pub async fn next(&mut self) -> Option<SessionView> {
        loop {
            match self.rx.recv().await {
                Ok(change)
                    if change.scope == StoreScope::Local
                        && change.touches_any(&keys::SESSION) =>
                {
                    let state = self.session.session().await.ok()?;
                    return Some(SessionView::from_state(&state));
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Missed notifications are safe: they carry names, not
                    // values, so one re-read catches up.
                    debug!("store change subscriber lagged by {missed}, re-reading");
                    let state = self.session.session().await.ok()?;
                    return Some(SessionView::from_state(&state));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// The fallback tab's data source.
///
/// Reads its original text from the addressable location rather than the
/// store, exposes the prompt template for editing, and on confirmation
/// persists the edit and issues one direct request to the relay.
pub struct OneShotSource {
    location: TabLocation,
    session: SessionStore,
    relay: RelayHandle,
}

impl OneShotSource {
    /// Open from a location query string. A location without valid original
    /// text is a user-facing error; the surface renders it and stops.
    pub fn open(
        query: &str,
        session: SessionStore,
        relay: RelayHandle,
    ) -> Result<Self, SurfaceError> {
        let location = TabLocation::parse(query)?;
        Ok(Self {
            location,
            session,
            relay,
        })
    }

    pub fn original(&self) -> &str {
        &self.location.original
    }

    /// The view before any request has been made.
    pub fn initial_view(&self) -> SessionView {
        SessionView::from_location(&self.location)
    }

    /// The current prompt template, for display and editing.
    pub async fn prompt_template(&self) -> Result<String, StoreError> {
        self.session.prompt_template().await
    }

    /// User confirmation: persist the (non-blank) edited template to the
    /// synchronized scope, then request the summary and render the single
    /// direct reply. No shared session state is touched on this path.
    pub async fn confirm(&self, edited_prompt: &str) -> Result<SessionView, SurfaceError> {
        self.session.set_prompt_template(edited_prompt).await?;
        let reply = self
            .relay
            .request(SurfaceRequest::get_summary(&self.location.original))
            .await;
        Ok(SessionView::from_reply(&self.location.original, &reply))
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
