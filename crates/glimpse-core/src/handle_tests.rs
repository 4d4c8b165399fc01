use super::*;
use async_trait::async_trait;

use glimpse_protocols::error::{SummarizeError, SurfaceError};
use glimpse_protocols::Summarizer;
use glimpse_store::{MemoryStore, SessionStore};

use crate::panel::PanelHost;
use crate::selection::PanelTarget;

struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn try_summarize(&self, text: &str) -> Result<String, SummarizeError> {
        Ok(format!("summary of {text}"))
    }
}

struct OpenPanels;

#[async_trait]
impl PanelHost for OpenPanels {
    async fn open(&self, _target: PanelTarget) -> Result<(), SurfaceError> {
        Ok(())
    }
}

fn spawn_relay() -> RelayHandle {
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    let relay = Arc::new(Relay::new(
        session,
        Arc::new(EchoSummarizer),
        Arc::new(OpenPanels),
    ));
    RelayHandle::spawn(relay)
}

#[tokio::test]
async fn test_request_round_trip() {
    let handle = spawn_relay();
    let reply = handle
        .request(SurfaceRequest::get_summary("tab text"))
        .await;
    assert_eq!(reply, SurfaceReply::result("summary of tab text"));
}

#[tokio::test]
async fn test_cloned_handles_share_the_relay() {
    let handle = spawn_relay();
    let clone = handle.clone();

    let first = handle.request(SurfaceRequest::get_summary("one")).await;
    let second = clone.request(SurfaceRequest::get_summary("two")).await;

    assert_eq!(first.text(), "summary of one");
    assert_eq!(second.text(), "summary of two");
}

#[tokio::test]
async fn test_closed_channel_surfaces_as_orchestration_error() {
    // A handle whose service task is gone: sends fail, and the reply is
    // the structured error, not a hang.
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    drop(rx);
    let handle = RelayHandle { tx };

    let reply = handle.request(SurfaceRequest::get_summary("text")).await;
    assert!(reply.is_error());
    assert_eq!(
        reply.text(),
        "Background summarization failed: relay is not running"
    );
}
