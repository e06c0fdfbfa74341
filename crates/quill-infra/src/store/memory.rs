//! In-memory key-value store - used when no data directory is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{KeyValueStore, StoreError};

/// In-memory store using a simple HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();
        store.set("users", "[]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[]".to_string()));
        assert!(store.exists("users").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = InMemoryStore::new();
        store.set("users", "[1]").await.unwrap();
        store.set("users", "[2]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[2]".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();
        store.set("users", "[]").await.unwrap();
        store.delete("users").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), None);
        store.delete("users").await.unwrap();
    }
}
