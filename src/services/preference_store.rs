// navsync Preference Store
// Typed get/set of small scalar preferences (JSON-encoded) over durable storage.
// Reads are gated on the first client-side activation so server-rendered and
// client-rendered markup agree.

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::storage::KeyValueStorage;
use crate::types::errors::PreferenceError;
use crate::types::preference::{PreferenceKey, PreferenceState};

struct PreferenceInner {
    storage: Rc<dyn KeyValueStorage>,
    available: Cell<bool>,
}

/// Preference store shared by every mounted component. Clones share availability.
#[derive(Clone)]
pub struct PersistentPreferenceStore {
    inner: Rc<PreferenceInner>,
}

impl PersistentPreferenceStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Rc::new(PreferenceInner {
                storage,
                available: Cell::new(false),
            }),
        }
    }

    /// True once the first client-side activation has completed.
    pub fn is_available(&self) -> bool {
        self.inner.available.get()
    }

    /// Marks the first client-side activation as complete. Idempotent.
    pub fn activate(&self) {
        self.inner.available.set(true);
    }

    /// Reads `key`, distinguishing "not yet available" from "default" and "stored".
    ///
    /// Missing, unreadable and malformed values all resolve to the key's default.
    pub async fn read<T>(&self, key: &PreferenceKey<T>) -> PreferenceState<T>
    where
        T: DeserializeOwned + Clone,
    {
        if !self.is_available() {
            return PreferenceState::Uninitialized;
        }

        match self.inner.storage.get(key.name()).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => PreferenceState::Loaded(value),
                Err(e) => {
                    warn!(key = key.name(), error = %e, "malformed preference, using default");
                    PreferenceState::Default(key.default_value())
                }
            },
            Ok(None) => PreferenceState::Default(key.default_value()),
            Err(e) => {
                warn!(key = key.name(), error = %e, "preference unavailable, using default");
                PreferenceState::Default(key.default_value())
            }
        }
    }

    /// Reads `key`, returning its default until the store is available.
    pub async fn read_value<T>(&self, key: &PreferenceKey<T>) -> T
    where
        T: DeserializeOwned + Clone,
    {
        self.read(key).await.value_or(key.default_value())
    }

    /// Persists `value` under `key` as JSON.
    pub async fn set<T>(&self, key: &PreferenceKey<T>, value: &T) -> Result<(), PreferenceError>
    where
        T: Serialize + Clone,
    {
        let json = serde_json::to_string(value)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
        self.inner.storage.set(key.name(), &json).await?;
        Ok(())
    }
}
