//! Decoding of chunk files.

use crate::record::PlayerRecord;
use projacc_common::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Decode chunk text read from `path` into its records.
///
/// The top level must be a JSON array. Entries that are not records with a
/// string `id` can never match a lookup and are skipped.
pub fn decode_chunk(text: &str, path: &Path) -> Result<Vec<PlayerRecord>> {
    let value: Value = serde_json::from_str(text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(Error::invalid_structure(path, "expected a JSON array"));
    };

    let total = entries.len();
    let records: Vec<PlayerRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping entry {} of {}: {}", index, path.display(), e);
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!(
            "Kept {} of {} entries from {}",
            records.len(),
            total,
            path.display()
        );
    }
    Ok(records)
}

/// Linear search of a chunk for the record with exactly `id`
pub fn find_record<'a>(records: &'a [PlayerRecord], id: &str) -> Option<&'a PlayerRecord> {
    records.iter().find(|record| record.id().as_str() == id)
}
