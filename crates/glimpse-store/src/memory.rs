//! In-memory state store for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{broadcast, RwLock};

use glimpse_protocols::error::StoreError;

use crate::store::{apply_entries, remove_keys, StateStore, StoreChange, StoreScope};

/// Capacity of the change-notification channel. Lagging subscribers miss
/// old notifications and re-read on the next one, which is safe because
/// notifications carry key names, not values.
const CHANGE_CAPACITY: usize = 64;

/// In-memory store.
pub struct MemoryStore {
    scopes: RwLock<HashMap<StoreScope, Map<String, Value>>>,
    events: broadcast::Sender<StoreChange>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            scopes: RwLock::new(HashMap::new()),
            events,
        }
    }

    fn notify(&self, scope: StoreScope, keys: Vec<String>) {
        if !keys.is_empty() {
            // No receivers is fine; nobody is watching yet.
            let _ = self.events.send(StoreChange { scope, keys });
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, scope: StoreScope, key: &str) -> Result<Option<Value>, StoreError> {
        let scopes = self.scopes.read().await;
        Ok(scopes.get(&scope).and_then(|doc| doc.get(key)).cloned())
    }

    async fn get_many(
        &self,
        scope: StoreScope,
        keys: &[&str],
    ) -> Result<Map<String, Value>, StoreError> {
        let scopes = self.scopes.read().await;
        let mut result = Map::new();
        if let Some(doc) = scopes.get(&scope) {
            for key in keys {
                if let Some(value) = doc.get(*key) {
                    result.insert((*key).to_string(), value.clone());
                }
            }
        }
        Ok(result)
    }

    async fn set_many(
        &self,
        scope: StoreScope,
        entries: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write().await;
        let doc = scopes.entry(scope).or_default();
        let changed = apply_entries(doc, entries);
        drop(scopes);
        self.notify(scope, changed);
        Ok(())
    }

    async fn remove(&self, scope: StoreScope, keys: &[&str]) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write().await;
        let removed = match scopes.get_mut(&scope) {
            Some(doc) => remove_keys(doc, keys),
            None => Vec::new(),
        };
        drop(scopes);
        self.notify(scope, removed);
        Ok(())
    }

    async fn snapshot(&self, scope: StoreScope) -> Result<Map<String, Value>, StoreError> {
        let scopes = self.scopes.read().await;
        Ok(scopes.get(&scope).cloned().unwrap_or_default())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
