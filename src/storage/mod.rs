//! Durable client-local key-value storage.
//!
//! Stores and controllers only see [`KeyValueStorage`]; the composition root picks
//! the backend. All calls are suspension points.

mod memory;
mod sqlite;

pub use memory::{MemoryStorage, UnavailableStorage};
pub use sqlite::SqliteStorage;

use async_trait::async_trait;

use crate::types::errors::StorageError;

/// String-keyed storage of opaque string values.
#[async_trait(?Send)]
pub trait KeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
