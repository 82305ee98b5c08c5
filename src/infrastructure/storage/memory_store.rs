use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{errors::StorageError, repositories::storage::StorageRepository};

/// Process-local store, used for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl StorageRepository for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().remove(key);
        Ok(())
    }

    fn check_connection(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
