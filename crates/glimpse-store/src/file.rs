//! File-backed state store.
//!
//! Each scope is persisted as one pretty-printed JSON document:
//!
//! ```text
//! {base}/
//! ├── local.json
//! └── synced.json
//! ```
//!
//! Documents are loaded once at open and mirrored in memory; every mutation
//! rewrites the scope's document. A missing document is an empty scope; an
//! unreadable or non-object document is a typed error, never a panic.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use glimpse_protocols::error::StoreError;

use crate::store::{apply_entries, remove_keys, StateStore, StoreChange, StoreScope};

const CHANGE_CAPACITY: usize = 64;

/// File-backed store.
pub struct FileStore {
    base: PathBuf,
    scopes: RwLock<HashMap<StoreScope, Map<String, Value>>>,
    events: broadcast::Sender<StoreChange>,
}

impl FileStore {
    /// Open (or create) a store under `base`.
    pub async fn open(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base).await?;

        let mut scopes = HashMap::new();
        for scope in [StoreScope::Local, StoreScope::Synced] {
            scopes.insert(scope, Self::load_scope(&base, scope).await?);
        }

        debug!("FileStore opened at {:?}", base);

        let (events, _) = broadcast::channel(CHANGE_CAPACITY);
        Ok(Self {
            base,
            scopes: RwLock::new(scopes),
            events,
        })
    }

    fn scope_path(base: &Path, scope: StoreScope) -> PathBuf {
        base.join(format!("{}.json", scope.as_str()))
    }

    async fn load_scope(base: &Path, scope: StoreScope) -> Result<Map<String, Value>, StoreError> {
        let path = Self::scope_path(base, scope);
        if !path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&path).await?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| StoreError::InvalidDocument {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        match value {
            Value::Object(doc) => Ok(doc),
            other => Err(StoreError::InvalidDocument {
                path: path.display().to_string(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    async fn persist(&self, scope: StoreScope, doc: &Map<String, Value>) -> Result<(), StoreError> {
        let path = Self::scope_path(&self.base, scope);
        let content = serde_json::to_string_pretty(&Value::Object(doc.clone()))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&path, format!("{content}\n")).await?;
        Ok(())
    }

    fn notify(&self, scope: StoreScope, keys: Vec<String>) {
        if !keys.is_empty() {
            let _ = self.events.send(StoreChange { scope, keys });
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl StateStore for FileStore {
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
        if !changed.is_empty() {
            self.persist(scope, doc).await?;
        }
        drop(scopes);
        self.notify(scope, changed);
        Ok(())
    }

    async fn remove(&self, scope: StoreScope, keys: &[&str]) -> Result<(), StoreError> {
        let mut scopes = self.scopes.write().await;
        let removed = match scopes.get_mut(&scope) {
            Some(doc) => {
                let removed = remove_keys(doc, keys);
                if !removed.is_empty() {
                    self.persist(scope, doc).await?;
                }
                removed
            }
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
#[path = "file_tests.rs"]
mod tests;
