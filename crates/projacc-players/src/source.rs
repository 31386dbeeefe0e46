//! Where manifest and chunk text comes from.
//!
//! The loader never touches the filesystem directly; it asks a
//! [`DataSource`] for a [`Resource`]. [`FsSource`] is the production
//! implementation, laid out as `<data_dir>/manifest.json` plus one
//! `<data_dir>/chunk_<n>.json` per chunk.

use projacc_common::config::DataConfig;
use projacc_common::{ChunkId, Error, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A readable unit of player data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The player manifest
    Manifest,
    /// One chunk of player records
    Chunk(ChunkId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => write!(f, "manifest"),
            Self::Chunk(chunk) => write!(f, "chunk {chunk}"),
        }
    }
}

/// Backing store for player data.
pub trait DataSource {
    /// Location of `resource`, used in errors and log lines
    fn locate(&self, resource: Resource) -> PathBuf;

    /// Read the full text of `resource`.
    ///
    /// An absent resource must be reported as [`Error::NotFound`] so the
    /// loader can tell it apart from one that exists but cannot be read.
    fn read(&self, resource: Resource) -> Result<String>;
}

/// Player data stored as JSON files in one directory
#[derive(Debug, Clone)]
pub struct FsSource {
    config: DataConfig,
}

impl FsSource {
    pub const fn new(config: DataConfig) -> Self {
        Self { config }
    }
}

impl DataSource for FsSource {
    fn locate(&self, resource: Resource) -> PathBuf {
        match resource {
            Resource::Manifest => self.config.manifest_path(),
            Resource::Chunk(chunk) => self.config.chunk_path(chunk),
        }
    }

    fn read(&self, resource: Resource) -> Result<String> {
        let path = self.locate(resource);
        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::NotFound { path },
            _ => Error::Io { path, source },
        })
    }
}
