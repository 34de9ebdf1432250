use thiserror::Error;

// === StorageError ===

/// Errors raised by a durable key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is inaccessible in this environment (disabled, quota, sandboxed).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// The backend accepted the call but failed to complete it.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

// === PreferenceError ===

/// Errors related to writing user preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The underlying storage rejected the write.
    #[error("Preference storage error: {0}")]
    Storage(#[from] StorageError),
    /// The value could not be encoded as JSON.
    #[error("Preference serialization error: {0}")]
    Serialization(String),
}

// === ConfigError ===

/// Errors related to loading the navigation configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("Config I/O error: {0}")]
    Io(String),
    /// The config file is not valid JSON for `NavigationConfig`.
    #[error("Config parse error: {0}")]
    Parse(String),
    /// The config parsed but a value is out of range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// === CategoryError ===

/// Errors reported by the external custom-categories provider.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category provider error: {0}")]
    Provider(String),
}
