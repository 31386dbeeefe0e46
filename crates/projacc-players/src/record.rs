//! Player records as stored in chunk files.

use projacc_common::PlayerId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single player's record.
///
/// Only `id` is interpreted; every other field is carried through untouched
/// for the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    id: PlayerId,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(id: impl Into<PlayerId>, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Look up an uninterpreted attribute such as `avg` or `team`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The record as a JSON object, `id` included
    pub fn to_value(&self) -> Value {
        let mut object = self.attributes.clone();
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        Value::Object(object)
    }
}
