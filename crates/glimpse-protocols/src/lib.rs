//! # Glimpse Protocols
//!
//! Shared contract definitions for the Glimpse summarization relay.
//! Contains the data model, wire messages, and trait seams - no
//! implementations beyond what the contracts themselves require.
//!
//! ## Contents
//!
//! - [`SessionState`] - the persisted record of the current summarization
//!   attempt, plus the flat storage key names it lives under
//! - [`SurfaceRequest`] / [`SurfaceReply`] - the one-shot request/reply
//!   messages exchanged between a display surface and the relay
//! - [`TabLocation`] - the percent-encoded addressable location handed to
//!   the fallback tab surface
//! - [`Summarizer`] - the trait seam for remote summarization clients
//! - [`error`] - one error enum per domain

pub mod error;
pub mod location;
pub mod message;
pub mod session;
pub mod summarizer;

pub use error::{RelayError, StoreError, SummarizeError, SurfaceError};
pub use location::{TabLocation, TabOutcome};
pub use message::{SurfaceReply, SurfaceRequest};
pub use session::{SessionPhase, SessionState, DEFAULT_PROMPT};
pub use summarizer::Summarizer;
