//! Chunk cache for the player loader
//!
//! Chunks are loaded on first use and kept for the lifetime of the cache.
//! A chunk that failed to load is cached as an empty slice, so storage is
//! consulted at most once per chunk number.

use crate::record::PlayerRecord;
use crate::status::LoadStatus;
use parking_lot::Mutex;
use projacc_common::ChunkId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Records of one chunk, shared with callers without copying
pub type ChunkRecords = Arc<[PlayerRecord]>;

/// Cache statistics for monitoring
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Requests answered from the cache
    pub hits: AtomicU64,
    /// Requests that went to storage
    pub misses: AtomicU64,
    /// Loads that ended up cached as empty
    pub failures: AtomicU64,
}

impl CacheStats {
    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }
}

struct CachedChunk {
    records: ChunkRecords,
    status: LoadStatus,
}

/// Append-only map from chunk number to loaded records
#[derive(Default)]
pub struct ChunkCache {
    entries: Mutex<HashMap<ChunkId, CachedChunk>>,
    stats: CacheStats,
}

impl ChunkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached records for `chunk`, running `load` on first request.
    ///
    /// The lock is held while `load` runs, so concurrent callers cannot load
    /// the same chunk twice.
    pub fn get_or_load<F>(&self, chunk: ChunkId, load: F) -> ChunkRecords
    where
        F: FnOnce() -> (ChunkRecords, LoadStatus),
    {
        let mut entries = self.entries.lock();
        if let Some(cached) = entries.get(&chunk) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(&cached.records);
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        let (records, status) = load();
        if status.is_degraded() {
            self.stats.failures.fetch_add(1, Ordering::Relaxed);
        }
        entries.insert(
            chunk,
            CachedChunk {
                records: Arc::clone(&records),
                status,
            },
        );
        records
    }

    /// Outcome of the load of `chunk`, if it was attempted
    pub fn status(&self, chunk: ChunkId) -> Option<LoadStatus> {
        self.entries
            .lock()
            .get(&chunk)
            .map(|cached| cached.status.clone())
    }

    /// Number of chunks loaded or attempted
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Number of records resident across all cached chunks
    pub fn record_count(&self) -> usize {
        self.entries
            .lock()
            .values()
            .map(|cached| cached.records.len())
            .sum()
    }

    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use std::cell::Cell;

    fn records(ids: &[&str]) -> ChunkRecords {
        ids.iter()
            .map(|id| PlayerRecord::new(*id, Map::new()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_cache_loads_once() {
        let cache = ChunkCache::new();
        let loads = Cell::new(0);
        let chunk = ChunkId::new(1);

        for _ in 0..3 {
            let got = cache.get_or_load(chunk, || {
                loads.set(loads.get() + 1);
                (records(&["a", "b"]), LoadStatus::Loaded)
            });
            assert_eq!(got.len(), 2);
        }

        assert_eq!(loads.get(), 1);
        assert_eq!(cache.stats().hits.load(Ordering::Relaxed), 2);
        assert_eq!(cache.stats().misses.load(Ordering::Relaxed), 1);
        assert!((cache.stats().hit_ratio() - 2.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_cache_keeps_failures() {
        let cache = ChunkCache::new();
        let chunk = ChunkId::new(5);
        let missing = LoadStatus::Missing {
            path: "chunk_5.json".into(),
        };

        let got = cache.get_or_load(chunk, || (records(&[]), missing.clone()));
        assert!(got.is_empty());

        let got = cache.get_or_load(chunk, || panic!("failed chunk was reloaded"));
        assert!(got.is_empty());
        assert_eq!(cache.status(chunk), Some(missing));
        assert_eq!(cache.stats().failures.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_cache_counts() {
        let cache = ChunkCache::new();
        assert!(cache.is_empty());
        assert!((cache.stats().hit_ratio() - 0.0).abs() < 0.001);

        cache.get_or_load(ChunkId::new(0), || (records(&["a"]), LoadStatus::Loaded));
        cache.get_or_load(ChunkId::new(1), || (records(&["b", "c"]), LoadStatus::Loaded));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.record_count(), 3);
        assert_eq!(cache.status(ChunkId::new(1)), Some(LoadStatus::Loaded));
        assert_eq!(cache.status(ChunkId::new(2)), None);
    }
}
