//! An address for the relay's request/reply entry point.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use glimpse_protocols::{SurfaceReply, SurfaceRequest};

use crate::relay::Relay;

const REQUEST_CAPACITY: usize = 16;

struct RelayCommand {
    request: SurfaceRequest,
    reply: oneshot::Sender<SurfaceReply>,
}

/// A cloneable address surfaces use to reach a relay running as a task.
///
/// Channel failures - the relay task gone, the reply dropped - surface as
/// the orchestration-error reply, never as a hang or a panic. This is the
/// one path where a structured `{ error }` (rather than a resolved result
/// string) reaches a surface.
#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    /// Spawn the relay service task and return its address.
    pub fn spawn(relay: Arc<Relay>) -> Self {
        let (tx, mut rx) = mpsc::channel::<RelayCommand>(REQUEST_CAPACITY);
        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                let reply = relay.handle_request(command.request).await;
                // A disinterested requester is fine.
                let _ = command.reply.send(reply);
            }
            debug!("relay request channel closed");
        });
        Self { tx }
    }

    /// Send one request and await exactly one reply.
    pub async fn request(&self, request: SurfaceRequest) -> SurfaceReply {
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = RelayCommand {
            request,
            reply: reply_tx,
        };
        if self.tx.send(command).await.is_err() {
            return SurfaceReply::orchestration_failure("relay is not running");
        }
        match reply_rx.await {
            Ok(reply) => reply,
            Err(_) => SurfaceReply::orchestration_failure("relay dropped the request"),
        }
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
