//! # Glimpse Store
//!
//! The persistent shared state store: a key-value store with a *local*
//! scope (device-only: session record and credential) and a *synchronized*
//! scope (prompt template). Every mutation that changes at least one key
//! emits a change notification, which is the only mechanism propagating
//! relay results to an already-open passive surface.
//!
//! Writers are serialized by last-write-wins semantics; there is no
//! compare-and-swap and no versioning. The design invariant - at most one
//! summarization in flight belongs to the visible passive surface - is
//! enforced procedurally by the relay, not by the store.
//!
//! - [`StateStore`] - the injectable store interface (get/set/subscribe)
//! - [`MemoryStore`] - in-memory store for tests and embedding
//! - [`FileStore`] - one JSON document per scope on disk
//! - [`SessionStore`] - the typed layer: session record, prompt template,
//!   credential

mod file;
mod memory;
mod session;
mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::SessionStore;
pub use store::{StateStore, StoreChange, StoreScope};
