//! Display surface building blocks.
//!
//! The three surface kinds (popup, side panel, fallback tab) render the
//! same view model; they differ only in where the data comes from:
//!
//! - [`StoreSource`] - the passive capability: one initial snapshot, then
//!   re-read on every session change notification (popup, side panel)
//! - [`OneShotSource`] - the fallback-tab capability: original text from
//!   its addressable location, a direct request on confirmation
//! - [`SessionView`] - the shared render model both feed
//! - [`PromptEditor`] - debounced persistence of prompt-template edits

mod prompt;
mod source;
mod view;

pub use prompt::PromptEditor;
pub use source::{OneShotSource, StoreSource};
pub use view::{SessionView, ViewStatus};
