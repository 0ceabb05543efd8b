//! Configuration module for keyforms
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/keyforms/config.toml` on Linux).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::CachedValues;
use crate::demo::DEFAULT_CONFIRM_THRESHOLD;

const fn default_confirm_threshold() -> u64 {
    DEFAULT_CONFIRM_THRESHOLD
}

const fn default_color() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyformsConfig {
    /// Bulk creations above this count ask for confirmation
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: u64,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Values the cached-values map starts from, e.g. a default `prefix`
    #[serde(default)]
    pub initial_values: HashMap<String, String>,
}

impl Default for KeyformsConfig {
    fn default() -> Self {
        Self {
            confirm_threshold: default_confirm_threshold(),
            color: default_color(),
            initial_values: HashMap::new(),
        }
    }
}

impl KeyformsConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("keyforms").join("config.toml"))
    }

    /// Load configuration from the default path, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading configuration");

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Same as [`Self::save_to`].
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Configuration as TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Cached values seeded from `initial_values`
    #[must_use]
    pub fn initial_cached_values(&self) -> CachedValues {
        CachedValues::from(self.initial_values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = KeyformsConfig::default();
        assert_eq!(config.confirm_threshold, 1000);
        assert!(config.initial_values.is_empty());
        assert!(config.color);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = KeyformsConfig::default();
        config.confirm_threshold = 50;
        config
            .initial_values
            .insert("prefix".to_string(), "952123".to_string());
        config.save_to(&path).unwrap();

        let loaded = KeyformsConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.initial_cached_values().get("prefix"), Some("952123"));
    }

    #[test]
    fn test_load_from_test_config() {
        let mut config = KeyformsConfig::default();
        config.color = false;
        let test_config = crate::testing::TestConfig::new(&config);

        assert_eq!(KeyformsConfig::load_from(test_config.path()).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "color = false\n").unwrap();

        let loaded = KeyformsConfig::load_from(&path).unwrap();
        assert_eq!(loaded.confirm_threshold, 1000);
        assert!(!loaded.color);
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(KeyformsConfig::load_from(&temp_dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_config_path_ends_with_keyforms() {
        if let Ok(path) = KeyformsConfig::config_path() {
            assert!(path.ends_with("keyforms/config.toml"));
        }
    }
}
