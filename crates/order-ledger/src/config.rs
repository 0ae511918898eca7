//! # Ledger Configuration
//!
//! Settings are read from a YAML document. Every field has a default, so an absent file (or an
//! empty mapping) yields an in-memory ledger.
//!
//! ```yaml
//! buffer_size: 64
//! max_write_retries: 8
//! storage:
//!   backend: file
//!   dir: /var/lib/pos/orders
//! ```

use ledger_framework::{FileBackend, MemoryBackend, StorageBackend, StorageError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV_VAR: &str = "ORDER_LEDGER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to open storage: {0}")]
    Storage(#[from] StorageError),
}

/// Where orders are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process-local map; lost on exit.
    #[default]
    Memory,
    /// One JSON file per order under `dir`.
    File { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Capacity of the actor's request channel.
    pub buffer_size: usize,
    /// Extra attempts for a transition that lost a write race.
    pub max_write_retries: u32,
    pub storage: StorageConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            max_write_retries: ledger_framework::DEFAULT_MAX_WRITE_RETRIES,
            storage: StorageConfig::Memory,
        }
    }
}

impl LedgerConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                info!(path = ?path, "Loading ledger config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be at least 1".into()));
        }
        if let StorageConfig::File { dir } = &self.storage {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("storage.dir must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Opens the configured storage backend.
    pub fn open_backend(&self) -> Result<Box<dyn StorageBackend>, ConfigError> {
        Ok(match &self.storage {
            StorageConfig::Memory => Box::new(MemoryBackend::new()),
            StorageConfig::File { dir } => Box::new(FileBackend::open(dir)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = LedgerConfig::from_yaml_str("buffer_size: 8\n").unwrap();
        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.max_write_retries, 8);
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_file_storage() {
        let config = LedgerConfig::from_yaml_str(
            "storage:\n  backend: file\n  dir: /tmp/orders\n",
        )
        .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::File {
                dir: PathBuf::from("/tmp/orders")
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            LedgerConfig::from_yaml_str("buffer_size: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LedgerConfig::from_yaml_str("buffer_sise: 4\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LedgerConfig::from_yaml_str("storage:\n  backend: redis\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.yaml");
        std::fs::write(&path, "max_write_retries: 2\n").unwrap();

        let config = LedgerConfig::load(&path).unwrap();
        assert_eq!(config.max_write_retries, 2);

        assert!(matches!(
            LedgerConfig::load(dir.path().join("missing.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
