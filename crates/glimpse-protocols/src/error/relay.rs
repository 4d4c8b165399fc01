//! Relay coordination errors.

use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no usable tab or window to display against")]
    NoDisplayTarget,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("relay channel closed: {0}")]
    ChannelClosed(String),
}
