//! Configuration types for projacc
//!
//! Read from a TOML file. Every field has a default, so an empty or absent
//! file yields a usable configuration.

use crate::error::{Error, Result};
use crate::types::ChunkId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Display name used for identifiers missing from the manifest
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Root configuration for projacc
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Player data location
    pub data: DataConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Where the manifest and chunk files live and how they are named
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the manifest and chunk files
    pub data_dir: PathBuf,
    /// Manifest file name inside `data_dir`
    pub manifest_file: String,
    /// Chunk file name prefix; chunk `n` lives in `<prefix><n>.json`
    pub chunk_prefix: String,
    /// Name returned for identifiers the manifest does not know
    pub placeholder_name: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("src/_data/players"),
            manifest_file: "manifest.json".to_string(),
            chunk_prefix: "chunk_".to_string(),
            placeholder_name: UNKNOWN_PLAYER.to_string(),
        }
    }
}

impl DataConfig {
    /// Data configuration rooted at `data_dir` with default file naming
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Full path of the manifest file
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.manifest_file)
    }

    /// Full path of the file for `chunk`
    #[must_use]
    pub fn chunk_path(&self, chunk: ChunkId) -> PathBuf {
        self.data_dir.join(format!("{}{}.json", self.chunk_prefix, chunk))
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.data_dir, PathBuf::from("src/_data/players"));
        assert_eq!(config.data.placeholder_name, "Unknown Player");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_paths() {
        let data = DataConfig::with_data_dir("/srv/site/players");
        assert_eq!(
            data.manifest_path(),
            PathBuf::from("/srv/site/players/manifest.json")
        );
        assert_eq!(
            data.chunk_path(ChunkId::new(12)),
            PathBuf::from("/srv/site/players/chunk_12.json")
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [data]
            data_dir = "data/players"
            chunk_prefix = "part-"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.data_dir, PathBuf::from("data/players"));
        assert_eq!(
            config.data.chunk_path(ChunkId::new(0)),
            PathBuf::from("data/players/part-0.json")
        );
        assert_eq!(config.data.manifest_file, "manifest.json");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[data]\ndata_dir = 5\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("projacc.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projacc.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.data, DataConfig::default());
    }
}
