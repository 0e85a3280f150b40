//! Message source configuration file handling
//!
//! Loads and saves ~/.config/dbmessages/config.yaml.

use crate::store::seconds_to_millis;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Table queried when none is configured
pub const DEFAULT_TABLE: &str = "messages";

/// Message source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSourceConfig {
    /// SQLite database holding the message table
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Table with `id` and `item` columns
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Seconds to serve the cached table before reloading it.
    /// `-1` caches forever, `0` reloads on every lookup.
    #[serde(default = "default_cache_seconds")]
    pub cache_seconds: i64,

    /// Return the code itself when no message is stored for it
    #[serde(default)]
    pub use_code_as_default_message: bool,
}

fn config_dir() -> PathBuf {
    // Always use ~/.config for consistency across platforms (macOS, Linux)
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("dbmessages");
    path
}

fn default_database() -> PathBuf {
    config_dir().join("messages.db")
}

fn default_table_name() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_cache_seconds() -> i64 {
    -1
}

impl MessageSourceConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self {
            database: default_database(),
            table_name: default_table_name(),
            cache_seconds: default_cache_seconds(),
            use_code_as_default_message: false,
        }
    }

    /// Load configuration from the default path (~/.config/dbmessages/config.yaml)
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::MessageError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading dbmessages configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            table = %config.table_name,
            cache_seconds = config.cache_seconds,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving dbmessages configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/dbmessages/config.yaml)
    pub fn default_path() -> PathBuf {
        config_dir().join("config.yaml")
    }

    /// Cache duration in milliseconds; any negative setting means forever
    pub fn cache_millis(&self) -> i64 {
        seconds_to_millis(self.cache_seconds)
    }
}

impl Default for MessageSourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_defaults() {
        let config = MessageSourceConfig::new();
        assert_eq!(config.table_name, "messages");
        assert_eq!(config.cache_seconds, -1);
        assert!(!config.use_code_as_default_message);
        assert!(config.database.ends_with("dbmessages/messages.db"));
    }

    #[test]
    fn test_cache_millis() {
        let mut config = MessageSourceConfig::new();
        assert_eq!(config.cache_millis(), -1);

        config.cache_seconds = 0;
        assert_eq!(config.cache_millis(), 0);

        config.cache_seconds = 30;
        assert_eq!(config.cache_millis(), 30_000);

        config.cache_seconds = -5;
        assert_eq!(config.cache_millis(), -1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = MessageSourceConfig::new();
        config.table_name = "labels".to_string();
        config.cache_seconds = 60;
        config.save(path).unwrap();

        let loaded = MessageSourceConfig::load(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "cache_seconds: 5\n").unwrap();

        let loaded = MessageSourceConfig::load(&path).unwrap();
        assert_eq!(loaded.cache_seconds, 5);
        assert_eq!(loaded.table_name, DEFAULT_TABLE);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        MessageSourceConfig::new().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_default_path() {
        let path = MessageSourceConfig::default_path();
        assert!(path.ends_with("dbmessages/config.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = MessageSourceConfig::load("/nonexistent/config.yaml");
        assert!(matches!(result, Err(crate::MessageError::Config(_))));
    }
}
