// navsync Config Loader
// Loads `NavigationConfig` from a JSON file, falling back to defaults when the file
// does not exist.

use std::fs;
use std::path::Path;

use crate::types::config::NavigationConfig;
use crate::types::errors::ConfigError;

/// Environment variable naming a config file to load at startup.
pub const CONFIG_PATH_ENV: &str = "NAVSYNC_CONFIG";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the config at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// `Io` if the file exists but cannot be read, `Parse` if it is not valid JSON for
    /// `NavigationConfig`, `Invalid` if a value is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<NavigationConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(NavigationConfig::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config file: {}", e)))?;

        let config: NavigationConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config file: {}", e)))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Loads from `$NAVSYNC_CONFIG` if set, otherwise returns the defaults.
    pub fn from_env() -> Result<NavigationConfig, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => Ok(NavigationConfig::default()),
        }
    }

    pub fn validate(config: &NavigationConfig) -> Result<(), ConfigError> {
        if config.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "history_capacity must be at least 1".to_string(),
            ));
        }

        let routes = [
            ("category_prefix", &config.category_prefix),
            ("search_route", &config.search_route),
            ("home_route", &config.home_route),
            ("favorites_route", &config.favorites_route),
        ];
        for (name, route) in routes {
            if !route.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with '/': {}",
                    name, route
                )));
            }
        }
        Ok(())
    }
}
