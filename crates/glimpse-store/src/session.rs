//! Typed access to the session record, prompt template, and credential.
//!
//! The relay and the surfaces go through this layer; nothing outside it
//! spells storage key names. Writes mirror the lifecycle: a full seed at
//! dispatch, a field-subset write at resolution, a removal when a fallback
//! session takes over.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::sync::broadcast;
use tracing::debug;

use glimpse_protocols::error::{StoreError, SurfaceError};
use glimpse_protocols::session::{keys, SUMMARY_FAILED};
use glimpse_protocols::{SessionState, DEFAULT_PROMPT};

use crate::store::{StateStore, StoreChange, StoreScope};

/// Typed store layer shared by the relay and every surface.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn StateStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// The underlying untyped store.
    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.store.subscribe()
    }

    /// Read the current session record; unset keys default.
    pub async fn session(&self) -> Result<SessionState, StoreError> {
        let values = self.store.get_many(StoreScope::Local, &keys::SESSION).await?;
        serde_json::from_value(Value::Object(values))
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write a full session record (dispatch time).
    pub async fn seed_session(&self, state: &SessionState) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(state).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(StoreError::Serialization(
                "session state did not serialize to an object".to_string(),
            ));
        };
        debug!("seeding session for {} chars", state.selected_text.len());
        self.store.set_many(StoreScope::Local, entries).await
    }

    /// Record a resolved summary: overwrite the summary text and clear the
    /// loading flag, touching nothing else.
    pub async fn complete_session(&self, summary: &str) -> Result<(), StoreError> {
        let mut entries = Map::new();
        entries.insert(keys::SUMMARY_TEXT.to_string(), json!(summary));
        entries.insert(keys::IS_LOADING.to_string(), json!(false));
        self.store.set_many(StoreScope::Local, entries).await
    }

    /// Record a failed attempt: error text set and the loading flag
    /// cleared, the placeholder summary left as it was.
    pub async fn record_attempt_error(&self, error: &str) -> Result<(), StoreError> {
        let mut entries = Map::new();
        entries.insert(keys::ERROR.to_string(), json!(error));
        entries.insert(keys::IS_LOADING.to_string(), json!(false));
        self.store.set_many(StoreScope::Local, entries).await
    }

    /// Record an orchestration failure: fixed failure summary, loading flag
    /// cleared, error text set.
    pub async fn fail_session(&self, message: &str) -> Result<(), StoreError> {
        let mut entries = Map::new();
        entries.insert(keys::SUMMARY_TEXT.to_string(), json!(SUMMARY_FAILED));
        entries.insert(keys::IS_LOADING.to_string(), json!(false));
        entries.insert(keys::ERROR.to_string(), json!(message));
        self.store.set_many(StoreScope::Local, entries).await
    }

    /// Remove the session record so passive surfaces never show data that
    /// belongs to a fallback session.
    pub async fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove(StoreScope::Local, &keys::SESSION).await
    }

    /// The prompt template, falling back to the built-in default when unset
    /// or blank.
    pub async fn prompt_template(&self) -> Result<String, StoreError> {
        let value = self
            .store
            .get(StoreScope::Synced, keys::CUSTOM_PROMPT)
            .await?;
        Ok(match value.as_ref().and_then(Value::as_str) {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => DEFAULT_PROMPT.to_string(),
        })
    }

    /// Persist an edited prompt template. Blank templates are rejected;
    /// use [`SessionStore::reset_prompt_template`] to return to the default.
    pub async fn set_prompt_template(&self, template: &str) -> Result<(), SurfaceError> {
        let trimmed = template.trim();
        if trimmed.is_empty() {
            return Err(SurfaceError::EmptyPrompt);
        }
        let mut entries = Map::new();
        entries.insert(keys::CUSTOM_PROMPT.to_string(), json!(trimmed));
        self.store.set_many(StoreScope::Synced, entries).await?;
        Ok(())
    }

    /// Remove the stored template, returning reads to the default.
    pub async fn reset_prompt_template(&self) -> Result<(), StoreError> {
        self.store
            .remove(StoreScope::Synced, &[keys::CUSTOM_PROMPT])
            .await
    }

    /// The credential, read fresh on every call. A blank stored value is
    /// treated as absent.
    pub async fn credential(&self) -> Result<Option<String>, StoreError> {
        let value = self.store.get(StoreScope::Local, keys::API_KEY).await?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string))
    }

    /// Store the credential.
    pub async fn set_credential(&self, api_key: &str) -> Result<(), StoreError> {
        let mut entries = Map::new();
        entries.insert(keys::API_KEY.to_string(), json!(api_key.trim()));
        self.store.set_many(StoreScope::Local, entries).await
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
