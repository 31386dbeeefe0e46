//! Error types for projacc
//!
//! Every fallible step of reading the player data set reports one of these.
//! The loader decides how each one degrades; nothing here is user-facing.

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for projacc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for projacc
#[derive(Debug, Error)]
pub enum Error {
    #[error("resource not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid structure in {}: {reason}", path.display())]
    InvalidStructure { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a not found error for `path`
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid structure error
    pub fn invalid_structure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if the resource was simply absent, as opposed to present but unusable
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
