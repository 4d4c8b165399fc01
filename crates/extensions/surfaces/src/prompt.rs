//! Debounced prompt-template persistence.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use glimpse_store::SessionStore;

/// Quiet period after the last keystroke before an edit is flushed.
const SAVE_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Debounced prompt editor.
///
/// Every keystroke feeds [`PromptEditor::edit`]; the latest text is
/// persisted to the synchronized scope once no further edit arrives within
/// the quiet period. Blank edits are never persisted. Explicit-save
/// surfaces call [`SessionStore::set_prompt_template`] directly instead.
pub struct PromptEditor {
    tx: mpsc::UnboundedSender<String>,
    worker: JoinHandle<()>,
}

impl PromptEditor {
    pub fn new(session: SessionStore) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let worker = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    match timeout(SAVE_QUIET_PERIOD, rx.recv()).await {
                        Ok(Some(newer)) => latest = newer,
                        Ok(None) => {
                            flush(&session, &latest).await;
                            return;
                        }
                        Err(_elapsed) => {
                            flush(&session, &latest).await;
                            break;
                        }
                    }
                }
            }
        });
        Self { tx, worker }
    }

    /// Record a keystroke's worth of edit.
    pub fn edit(&self, template: impl Into<String>) {
        // The worker is gone only during shutdown; dropping the edit then
        // matches what closing the surface does.
        let _ = self.tx.send(template.into());
    }

    /// Flush any pending edit and stop the editor.
    pub async fn finish(self) {
        let Self { tx, worker } = self;
        drop(tx);
        let _ = worker.await;
    }
}

async fn flush(session: &SessionStore, template: &str) {
    if template.trim().is_empty() {
        debug!("ignoring blank prompt edit");
        return;
    }
    if let Err(err) = session.set_prompt_template(template).await {
        warn!("failed to save prompt template: {err}");
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
