//! Error types for the Glimpse protocol layer.

mod relay;
mod store;
mod summarizer;
mod surface;

pub use relay::*;
pub use store::*;
pub use summarizer::*;
pub use surface::*;
