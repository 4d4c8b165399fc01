//! # Glimpse Config
//!
//! Configuration management: TOML files with environment-variable
//! substitution and sensible defaults. An absent config file means
//! defaults; the credential is NOT configuration - it lives in the state
//! store and is read fresh per request.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ApiConfig, GlimpseConfig, StorageConfig};
