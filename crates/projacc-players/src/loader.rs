//! Manifest-indexed player loader.
//!
//! The manifest is read once when the loader is built. Chunks are read on
//! first use through the [`ChunkCache`]. Every failure is logged and turned
//! into an empty result: a corrupt chunk costs the pages that need it their
//! stat block, never the whole site build.

use crate::cache::{ChunkCache, ChunkRecords};
use crate::chunk::{decode_chunk, find_record};
use crate::manifest::Manifest;
use crate::record::PlayerRecord;
use crate::source::{DataSource, FsSource, Resource};
use crate::status::LoadStatus;
use projacc_common::config::{DataConfig, UNKNOWN_PLAYER};
use projacc_common::{ChunkId, PlayerId};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Resolves player ids to records and display names
pub struct PlayerLoader<S = FsSource> {
    source: S,
    manifest: Manifest,
    manifest_status: LoadStatus,
    cache: ChunkCache,
    placeholder: String,
}

impl PlayerLoader<FsSource> {
    /// Open the player data described by `config`
    pub fn open(config: &DataConfig) -> Self {
        Self::new(FsSource::new(config.clone()), config.placeholder_name.clone())
    }
}

impl<S: DataSource> PlayerLoader<S> {
    /// Build a loader over `source`, reading its manifest immediately.
    ///
    /// `placeholder` is the name returned for ids the manifest does not know.
    pub fn new(source: S, placeholder: impl Into<String>) -> Self {
        let (manifest, manifest_status) = load_manifest(&source);
        Self {
            source,
            manifest,
            manifest_status,
            cache: ChunkCache::new(),
            placeholder: placeholder.into(),
        }
    }

    /// Build a loader over `source` with the default placeholder name
    pub fn with_source(source: S) -> Self {
        Self::new(source, UNKNOWN_PLAYER)
    }

    /// Full record for `id`, or `None` if it cannot be resolved.
    ///
    /// An id the manifest maps to a chunk that does not contain it resolves
    /// to `None` without further notice.
    pub fn get_player(&self, id: &str) -> Option<PlayerRecord> {
        let info = self.manifest.get(id)?;
        let records = self.load_chunk(info.chunk);
        find_record(&records, id).cloned()
    }

    /// Display name for `id`, or the placeholder. Never reads chunk data.
    ///
    /// Entries listed without a name also get the placeholder.
    pub fn get_player_name(&self, id: &str) -> &str {
        self.manifest
            .get(id)
            .and_then(|info| info.name.as_deref())
            .unwrap_or(&self.placeholder)
    }

    /// Records of `chunk`, read from storage only on the first request.
    ///
    /// A chunk that is missing or malformed yields an empty slice, now and
    /// on every later request.
    pub fn load_chunk(&self, chunk: ChunkId) -> ChunkRecords {
        self.cache.get_or_load(chunk, || {
            let resource = Resource::Chunk(chunk);
            let path = self.source.locate(resource);
            match self
                .source
                .read(resource)
                .and_then(|text| decode_chunk(&text, &path))
            {
                Ok(records) => {
                    debug!(
                        "Loaded player chunk {} ({} records)",
                        path.display(),
                        records.len()
                    );
                    (records.into(), LoadStatus::Loaded)
                }
                Err(e) => (
                    Vec::<PlayerRecord>::new().into(),
                    LoadStatus::degrade("player chunk", &e, path),
                ),
            }
        })
    }

    /// All known player ids, in no particular order
    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.manifest.ids()
    }

    /// `(id, name)` pairs sorted by name, then id
    pub fn players(&self) -> Vec<(&PlayerId, &str)> {
        let mut players: Vec<_> = self
            .manifest
            .iter()
            .map(|(id, info)| (id, info.name.as_deref().unwrap_or(&self.placeholder)))
            .collect();
        players.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        players
    }

    pub fn contains(&self, id: &str) -> bool {
        self.manifest.contains(id)
    }

    pub fn len(&self) -> usize {
        self.manifest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    /// Distinct chunks referenced by the manifest, ascending
    pub fn chunk_ids(&self) -> BTreeSet<ChunkId> {
        self.manifest.chunk_ids()
    }

    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Whether the manifest was loaded or replaced by an empty one
    pub const fn manifest_status(&self) -> &LoadStatus {
        &self.manifest_status
    }

    /// Outcome of loading `chunk`, or `None` if it was never requested
    pub fn chunk_status(&self, chunk: ChunkId) -> Option<LoadStatus> {
        self.cache.status(chunk)
    }

    pub const fn cache(&self) -> &ChunkCache {
        &self.cache
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub const fn source(&self) -> &S {
        &self.source
    }
}

fn load_manifest<S: DataSource>(source: &S) -> (Manifest, LoadStatus) {
    let path = source.locate(Resource::Manifest);
    match source
        .read(Resource::Manifest)
        .and_then(|text| Manifest::parse(&text, &path))
    {
        Ok(manifest) => {
            info!(
                "Loaded players manifest {} ({} players)",
                path.display(),
                manifest.len()
            );
            (manifest, LoadStatus::Loaded)
        }
        Err(e) => (
            Manifest::default(),
            LoadStatus::degrade("players manifest", &e, path),
        ),
    }
}
