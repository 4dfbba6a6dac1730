//! Configuration file
//!
//! A single JSON object, default `./expedientes.json`:
//!
//! ```json
//! { "data_dir": "./data", "default_items_per_page": 20 }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::DEFAULT_ITEMS_PER_PAGE;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Store file name inside `data_dir` (default "expedientes.json")
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Page size for queries that do not set one (default 10)
    #[serde(default = "default_items_per_page")]
    pub default_items_per_page: usize,

    /// Whether `init` inserts the sample records (default true)
    #[serde(default = "default_seed_on_init")]
    pub seed_on_init: bool,
}

fn default_store_file() -> String {
    "expedientes.json".to_string()
}
fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}
fn default_seed_on_init() -> bool {
    true
}

impl Config {
    /// Config with defaults for everything but the data directory
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            store_file: default_store_file(),
            default_items_per_page: default_items_per_page(),
            seed_on_init: default_seed_on_init(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }

        if self.store_file.trim().is_empty()
            || self.store_file.contains('/')
            || self.store_file.contains('\\')
        {
            return Err(ConfigError::Invalid(format!(
                "store_file must be a plain file name, got '{}'",
                self.store_file
            )));
        }

        if self.default_items_per_page == 0 {
            return Err(ConfigError::Invalid(
                "default_items_per_page must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Full path of the store file
    pub fn store_path(&self) -> PathBuf {
        self.data_path().join(&self.store_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_json_str(r#"{"data_dir": "/tmp/exp"}"#).unwrap();
        assert_eq!(config, Config::new("/tmp/exp"));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/exp/expedientes.json"));
        assert_eq!(config.default_items_per_page, 10);
        assert!(config.seed_on_init);
    }

    #[test]
    fn test_missing_data_dir_rejected() {
        let err = Config::from_json_str("{}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = Config::from_json_str(r#"{"data_dir": "d", "default_items_per_page": 0}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_store_file_must_be_plain_name() {
        let err = Config::from_json_str(r#"{"data_dir": "d", "store_file": "../x.json"}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/expedientes.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
