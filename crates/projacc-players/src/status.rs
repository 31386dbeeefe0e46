//! Outcome of loading a manifest or chunk.

use projacc_common::Error;
use std::path::PathBuf;
use tracing::{error, warn};

/// What happened when a resource was loaded.
///
/// Lookups never fail; a resource that could not be used is replaced by an
/// empty one. This status records which of the two actually happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Read and decoded successfully (possibly with zero entries)
    Loaded,
    /// The resource does not exist
    Missing { path: PathBuf },
    /// The resource exists but could not be read or has the wrong shape
    Invalid { path: PathBuf, reason: String },
}

impl LoadStatus {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// True when the resource was replaced by an empty one
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !self.is_loaded()
    }

    /// Log `err` and turn it into a degraded status.
    ///
    /// Absent resources are logged as warnings, everything else as errors.
    pub(crate) fn degrade(what: &str, err: &Error, path: PathBuf) -> Self {
        if err.is_not_found() {
            warn!("{} file not found: {}", what, path.display());
            Self::Missing { path }
        } else {
            error!("Invalid {} {}: {}", what, path.display(), err);
            Self::Invalid {
                path,
                reason: err.to_string(),
            }
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Missing { path } => write!(f, "missing ({})", path.display()),
            Self::Invalid { reason, .. } => write!(f, "invalid ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_missing() {
        let err = Error::not_found("players/chunk_9.json");
        let status = LoadStatus::degrade("player chunk", &err, "players/chunk_9.json".into());
        assert_eq!(
            status,
            LoadStatus::Missing {
                path: "players/chunk_9.json".into()
            }
        );
        assert!(status.is_degraded());
    }

    #[test]
    fn test_degrade_invalid() {
        let err = Error::invalid_structure("players/chunk_9.json", "expected a JSON array");
        let status = LoadStatus::degrade("player chunk", &err, "players/chunk_9.json".into());
        match &status {
            LoadStatus::Invalid { reason, .. } => assert!(reason.contains("expected a JSON array")),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(!status.is_loaded());
    }
}
