use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use super::KeyValueStorage;
use crate::types::errors::StorageError;

/// Process-local storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value without going through the async interface.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait(?Send)]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage disabled by the environment: every call fails with `Unavailable`.
#[derive(Debug, Default)]
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::Unavailable(self.reason.clone())
    }
}

#[async_trait(?Send)]
impl KeyValueStorage for UnavailableStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.error())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.error())
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(self.error())
    }
}
