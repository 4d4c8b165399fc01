//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlimpseConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Summarization API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Model identifier appended to the endpoint path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Selections shorter than this (after trimming) are rejected without a
    /// network call.
    #[serde(default = "default_min_selection_chars")]
    pub min_selection_chars: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            min_selection_chars: default_min_selection_chars(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-pro-latest".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_min_selection_chars() -> usize {
    10
}

/// State store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for the store documents; `~` is expanded at read time.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl StorageConfig {
    /// The storage path with `~` expanded.
    pub fn expanded_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.glimpse".to_string()
}
