//! Display surface errors.

use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("panel could not be opened for {target}")]
    PanelUnavailable { target: String },

    #[error("fallback location is missing the original text")]
    MissingOriginalText,

    #[error("fallback location could not be decoded: {0}")]
    InvalidLocation(String),

    #[error("prompt template cannot be empty")]
    EmptyPrompt,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
