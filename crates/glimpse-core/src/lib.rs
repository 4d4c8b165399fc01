//! # Glimpse Core
//!
//! The relay: the single coordination point between a "summarize this
//! text" intent, the remote summarization client, and whichever display
//! surface is reachable.
//!
//! Two entry points:
//!
//! - [`Relay::handle_selection`] - selection-triggered: attempt a side
//!   panel; on success seed the shared session and resolve the summary
//!   into it, on failure hand the text to a fallback tab
//! - [`Relay::handle_request`] - an explicit one-shot request from a
//!   surface, answered directly with no session mutation
//!
//! [`RelayHandle`] gives surfaces an address for the second entry point
//! when the relay runs as a task.

mod handle;
mod panel;
mod relay;
mod selection;

pub use handle::RelayHandle;
pub use panel::PanelHost;
pub use relay::{Relay, SessionRoute};
pub use selection::{PanelTarget, SelectionEvent, TabId, WindowId};
