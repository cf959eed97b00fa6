//! Store configuration loaded from environment variables.
//!
//! | Variable                 | Default         |
//! |--------------------------|-----------------|
//! | `CATALOG_DATA_DIR`       | `./data`        |
//! | `CATALOG_PRODUCTS_FILE`  | `products.json` |
//! | `CATALOG_CARTS_FILE`     | `carts.json`    |
//! | `CATALOG_STORAGE_FORMAT` | `json`          |
//! | `CATALOG_CHANNEL_BUFFER` | `32`            |
//!
//! A `.env` file in the working directory is read first, if present.

use record_framework::StorageFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where and how the two collections are persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub carts_file: String,
    /// Applies to both files.
    pub format: StorageFormat,
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            products_file: "products.json".to_string(),
            carts_file: "carts.json".to_string(),
            format: StorageFormat::JsonArray,
            channel_buffer: 32,
        }
    }
}

impl StoreConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_env_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let format = get_env_or_default("CATALOG_STORAGE_FORMAT", "json")
            .parse::<StorageFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_STORAGE_FORMAT".to_string(), e.to_string()))?;
        let channel_buffer = get_env_or_default("CATALOG_CHANNEL_BUFFER", "32")
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_CHANNEL_BUFFER".to_string(), e.to_string()))?;
        if channel_buffer == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_CHANNEL_BUFFER".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default("CATALOG_DATA_DIR", "./data")),
            products_file: get_env_or_default("CATALOG_PRODUCTS_FILE", "products.json"),
            carts_file: get_env_or_default("CATALOG_CARTS_FILE", "carts.json"),
            format,
            channel_buffer,
        })
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join(&self.carts_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.products_path(), PathBuf::from("./data/products.json"));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("CATALOG_DATA_DIR", "/srv/shop"),
            ("CATALOG_CARTS_FILE", "carts.jsonl"),
            ("CATALOG_STORAGE_FORMAT", "jsonl"),
            ("CATALOG_CHANNEL_BUFFER", "8"),
        ]))
        .unwrap();
        assert_eq!(config.carts_path(), PathBuf::from("/srv/shop/carts.jsonl"));
        assert_eq!(config.format, StorageFormat::JsonLines);
        assert_eq!(config.channel_buffer, 8);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("CATALOG_STORAGE_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_STORAGE_FORMAT"));

        assert!(StoreConfig::from_lookup(lookup(&[("CATALOG_CHANNEL_BUFFER", "0")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[("CATALOG_CHANNEL_BUFFER", "lots")])).is_err());
    }
}
