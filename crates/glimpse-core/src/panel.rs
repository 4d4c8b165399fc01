//! The panel host seam.

use async_trait::async_trait;

use glimpse_protocols::error::SurfaceError;

use crate::selection::PanelTarget;

/// The collaborator that attempts to realize a side-panel surface.
///
/// Opening may fail for restricted document contexts (PDF viewers and
/// similar) - an expected, recoverable outcome that routes the session to
/// the fallback tab, not a bug.
#[async_trait]
pub trait PanelHost: Send + Sync {
    /// Attempt to open the panel against the target.
    async fn open(&self, target: PanelTarget) -> Result<(), SurfaceError>;
}
