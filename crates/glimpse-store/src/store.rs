//! The injectable store interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use glimpse_protocols::error::StoreError;

/// Which of the two storage scopes a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreScope {
    /// Device-only: session record and credential.
    Local,
    /// Replicated across the user's devices: prompt template.
    Synced,
}

impl StoreScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Synced => "synced",
        }
    }
}

impl std::fmt::Display for StoreScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change notification: which scope mutated and which keys changed.
///
/// Subscribers re-read the keys they care about; the notification carries
/// names, not values, so a late subscriber never renders stale payloads.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub scope: StoreScope,
    pub keys: Vec<String>,
}

impl StoreChange {
    /// True when the change touches any of the given keys.
    pub fn touches_any(&self, keys: &[&str]) -> bool {
        self.keys.iter().any(|k| keys.contains(&k.as_str()))
    }
}

/// The shared state store interface.
///
/// All cross-surface coordination is mediated through an implementation of
/// this trait; surfaces and the relay depend on the abstraction, never on
/// ambient global storage.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get a single value, `None` when unset.
    async fn get(&self, scope: StoreScope, key: &str) -> Result<Option<Value>, StoreError>;

    /// Get several values at once; unset keys are absent from the result.
    async fn get_many(
        &self,
        scope: StoreScope,
        keys: &[&str],
    ) -> Result<Map<String, Value>, StoreError>;

    /// Set several values at once. Emits one change notification covering
    /// the keys whose stored value actually changed; a write that changes
    /// nothing emits nothing.
    async fn set_many(&self, scope: StoreScope, entries: Map<String, Value>)
        -> Result<(), StoreError>;

    /// Remove keys. Emits one notification covering the keys that were
    /// present; removing absent keys emits nothing.
    async fn remove(&self, scope: StoreScope, keys: &[&str]) -> Result<(), StoreError>;

    /// The full contents of a scope.
    async fn snapshot(&self, scope: StoreScope) -> Result<Map<String, Value>, StoreError>;

    /// Subscribe to change notifications for every scope.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}

/// Apply `entries` to `doc`, returning the keys whose value changed.
pub(crate) fn apply_entries(doc: &mut Map<String, Value>, entries: Map<String, Value>) -> Vec<String> {
    let mut changed = Vec::new();
    for (key, value) in entries {
        if doc.get(&key) != Some(&value) {
            changed.push(key.clone());
            doc.insert(key, value);
        }
    }
    changed
}

/// Remove `keys` from `doc`, returning the keys that were present.
pub(crate) fn remove_keys(doc: &mut Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let mut removed = Vec::new();
    for key in keys {
        if doc.remove(*key).is_some() {
            removed.push((*key).to_string());
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_as_str() {
        assert_eq!(StoreScope::Local.as_str(), "local");
        assert_eq!(StoreScope::Synced.as_str(), "synced");
    }

    #[test]
    fn test_change_touches_any() {
        let change = StoreChange {
            scope: StoreScope::Local,
            keys: vec!["isLoading".to_string()],
        };
        assert!(change.touches_any(&["summaryText", "isLoading"]));
        assert!(!change.touches_any(&["customPrompt"]));
    }

    #[test]
    fn test_apply_entries_reports_only_changed() {
        let mut doc = Map::new();
        doc.insert("a".to_string(), json!(1));

        let mut entries = Map::new();
        entries.insert("a".to_string(), json!(1));
        entries.insert("b".to_string(), json!(2));

        let changed = apply_entries(&mut doc, entries);
        assert_eq!(changed, vec!["b".to_string()]);
        assert_eq!(doc["b"], json!(2));
    }

    #[test]
    fn test_remove_keys_reports_only_present() {
        let mut doc = Map::new();
        doc.insert("a".to_string(), json!(1));

        let removed = remove_keys(&mut doc, &["a", "b"]);
        assert_eq!(removed, vec!["a".to_string()]);
        assert!(doc.is_empty());
    }
}
