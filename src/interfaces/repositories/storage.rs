use serde::{de::DeserializeOwned, Serialize};

use crate::errors::StorageError;

/// String-keyed blob storage. Every persisted piece of state (content
/// collections, credentials, session marker, presence table) is one JSON
/// value under one key.
#[cfg_attr(test, mockall::automock)]
pub trait StorageRepository: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Cheap round trip used by the health check
    fn check_connection(&self) -> Result<(), StorageError>;
}

/// Typed JSON access on top of [`StorageRepository`].
pub trait JsonStorage {
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;
    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError>;
}

impl<S> JsonStorage for S
where
    S: StorageRepository + ?Sized,
{
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Serialization {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set_item(key, &raw)
    }
}
