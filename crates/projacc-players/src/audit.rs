//! Consistency check between the manifest and the chunk files.
//!
//! Lookups tolerate a manifest that points at the wrong chunk; the audit is
//! where such drift becomes visible.

use crate::chunk::find_record;
use crate::loader::PlayerLoader;
use crate::source::DataSource;
use crate::status::LoadStatus;
use projacc_common::{ChunkId, PlayerId};
use tracing::{info, warn};

/// Result of [`PlayerLoader::audit`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Players listed in the manifest
    pub players: usize,
    /// Players whose record was found in their chunk
    pub resolved: usize,
    /// Players whose chunk loaded but does not contain their record
    pub dangling: Vec<PlayerId>,
    /// Chunks that could not be loaded, with the reason
    pub failed_chunks: Vec<(ChunkId, LoadStatus)>,
    /// Records found in a chunk the manifest does not point them to
    pub unreferenced: Vec<(ChunkId, PlayerId)>,
}

impl AuditReport {
    /// True when every manifest entry resolves and every record is indexed
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.resolved == self.players && self.unreferenced.is_empty()
    }
}

impl<S: DataSource> PlayerLoader<S> {
    /// Load every chunk the manifest references and cross-check both sides.
    ///
    /// Never fails; chunks that cannot be loaded are reported, not raised.
    pub fn audit(&self) -> AuditReport {
        let mut report = AuditReport {
            players: self.len(),
            ..AuditReport::default()
        };

        for chunk in self.chunk_ids() {
            let records = self.load_chunk(chunk);
            if let Some(status) = self.chunk_status(chunk).filter(LoadStatus::is_degraded) {
                report.failed_chunks.push((chunk, status));
                continue;
            }
            for record in records.iter() {
                let indexed = self
                    .manifest()
                    .get(record.id().as_str())
                    .is_some_and(|info| info.chunk == chunk);
                if !indexed {
                    report.unreferenced.push((chunk, record.id().clone()));
                }
            }
        }

        let mut entries: Vec<_> = self.manifest().iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (id, info) in entries {
            let failed = report.failed_chunks.iter().any(|(c, _)| *c == info.chunk);
            if failed {
                continue;
            }
            if find_record(&self.load_chunk(info.chunk), id.as_str()).is_some() {
                report.resolved += 1;
            } else {
                report.dangling.push(id.clone());
            }
        }

        if !report.dangling.is_empty() {
            warn!(
                "{} manifest entries have no record in their chunk",
                report.dangling.len()
            );
        }
        info!(
            "Audit: {}/{} players resolved, {} chunks failed, {} unreferenced records",
            report.resolved,
            report.players,
            report.failed_chunks.len(),
            report.unreferenced.len()
        );
        report
    }
}
