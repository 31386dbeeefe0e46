//! Player manifest: which chunk holds each player, and the player's display name.
//!
//! The manifest is a JSON object with a `players` object keyed by player id:
//!
//! ```json
//! { "players": { "545361": { "chunk": 0, "name": "Mike Trout" } } }
//! ```

use projacc_common::{ChunkId, Error, PlayerId, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::warn;

/// Manifest entry for one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Chunk file holding the full record
    pub chunk: ChunkId,
    /// Display name, if the entry has one
    pub name: Option<String>,
}

impl PlayerInfo {
    /// Decode one `players` entry. Only a usable `chunk` is required.
    fn from_value(entry: &Value) -> Option<Self> {
        let chunk = entry.get("chunk").and_then(chunk_number)?;
        let name = entry.get("name").and_then(Value::as_str).map(str::to_string);
        Some(Self {
            chunk: ChunkId::new(chunk),
            name,
        })
    }
}

/// A non-negative integral JSON number; `1.0` counts as chunk 1
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn chunk_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

/// `players` values the site build treats as present: anything but
/// null, `false`, `0` and `""`
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Index from player id to [`PlayerInfo`]. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    players: HashMap<PlayerId, PlayerInfo>,
}

impl Manifest {
    /// Parse manifest text read from `path`.
    ///
    /// Fails if the text is not JSON, is not an object, or its `players`
    /// field is absent, null, `false`, `0` or `""`. Any other non-object
    /// `players` value yields an empty manifest. Entries without a usable
    /// `chunk` are dropped with a warning; entries without a string `name`
    /// are kept and resolve to the placeholder name.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(mut root) = root else {
            return Err(Error::invalid_structure(path, "manifest is not a JSON object"));
        };
        let players = match root.remove("players") {
            Some(Value::Object(players)) => players,
            Some(value) if is_present(&value) => {
                warn!(
                    "Players manifest {} has a non-object `players` field; no players listed",
                    path.display()
                );
                Map::new()
            }
            _ => return Err(Error::invalid_structure(path, "missing `players` field")),
        };

        let mut manifest = Self::default();
        for (id, entry) in players {
            match PlayerInfo::from_value(&entry) {
                Some(info) => {
                    manifest.players.insert(PlayerId::new(id), info);
                }
                None => warn!(
                    "Skipping manifest entry '{}' in {}: no usable chunk number",
                    id,
                    path.display()
                ),
            }
        }
        Ok(manifest)
    }

    pub fn get(&self, id: &str) -> Option<&PlayerInfo> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All player ids, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &PlayerInfo)> {
        self.players.iter()
    }

    /// Distinct chunk numbers referenced by the manifest, ascending
    pub fn chunk_ids(&self) -> BTreeSet<ChunkId> {
        self.players.values().map(|info| info.chunk).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Manifest> {
        Manifest::parse(text, Path::new("players/manifest.json"))
    }

    #[test]
    fn test_parse_manifest() {
        let manifest = parse(
            r#"{"players": {
                "p1": {"chunk": 0, "name": "Test Player"},
                "p2": {"chunk": 3, "name": "Other Player", "team": "SEA"}
            }}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(
            manifest.get("p1"),
            Some(&PlayerInfo {
                chunk: ChunkId::new(0),
                name: Some("Test Player".to_string())
            })
        );
        assert_eq!(manifest.get("p2").unwrap().chunk, ChunkId::new(3));
        assert!(manifest.get("p3").is_none());
        assert_eq!(
            manifest.chunk_ids().into_iter().collect::<Vec<_>>(),
            vec![ChunkId::new(0), ChunkId::new(3)]
        );
    }

    #[test]
    fn test_parse_empty_players() {
        let manifest = parse(r#"{"players": {}}"#).unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.chunk_ids().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(matches!(parse("not json"), Err(Error::Json { .. })));
        for text in [
            "[]",
            "42",
            "null",
            r#"{"items": {}}"#,
            r#"{"players": null}"#,
            r#"{"players": false}"#,
            r#"{"players": 0}"#,
            r#"{"players": ""}"#,
        ] {
            assert!(
                matches!(parse(text), Err(Error::InvalidStructure { .. })),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn test_parse_non_object_players_is_empty() {
        for text in [
            r#"{"players": []}"#,
            r#"{"players": ["p1"]}"#,
            r#"{"players": true}"#,
            r#"{"players": "all"}"#,
        ] {
            let manifest = parse(text).unwrap();
            assert!(manifest.is_empty(), "listed players for {text}");
        }
    }

    #[test]
    fn test_parse_lenient_entries() {
        let manifest = parse(
            r#"{"players": {
                "good": {"chunk": 1, "name": "Good"},
                "float_chunk": {"chunk": 2.0, "name": "Float"},
                "nameless": {"chunk": 0},
                "numeric_name": {"chunk": 0, "name": 12},
                "no_chunk": {"name": "No Chunk"},
                "negative": {"chunk": -1, "name": "Negative"},
                "fractional": {"chunk": 1.5, "name": "Fractional"},
                "string_chunk": {"chunk": "1", "name": "String"},
                "not_object": 7
            }}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 4);
        assert_eq!(manifest.get("float_chunk").unwrap().chunk, ChunkId::new(2));
        assert_eq!(
            manifest.get("float_chunk").unwrap().name.as_deref(),
            Some("Float")
        );
        assert_eq!(manifest.get("nameless").unwrap().name, None);
        assert_eq!(manifest.get("numeric_name").unwrap().name, None);
        for dropped in ["no_chunk", "negative", "fractional", "string_chunk", "not_object"] {
            assert!(!manifest.contains(dropped), "kept {dropped}");
        }
    }
}
