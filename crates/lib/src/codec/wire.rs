//! Wire document layout.
//!
//! A container is written as two parallel string maps keyed by the
//! container's keys: `data` holds each value's encoded payload and
//! `typeInfo` holds its type identifier. Both keep the container's key
//! order.
//!
//! ```json
//! {
//!   "data":     { "hp": "30", "pos": "{\"x\":1.0,\"y\":2.0}" },
//!   "typeInfo": { "hp": "int", "pos": "vec2" }
//! }
//! ```
//!
//! Nested containers are stored as the JSON text of their own wire document.
//! Lists and maps of containers use a [`CollectionPayload`].

use serde::{Deserialize, Serialize};

use crate::ordered::OrderedMap;

/// Serialized form of a single container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// Encoded payload per key.
    #[serde(default)]
    pub data: OrderedMap<String, String>,
    /// Type identifier per key.
    #[serde(default)]
    pub type_info: OrderedMap<String, String>,
}

impl WireDocument {
    /// Records one encoded field.
    pub fn insert(&mut self, key: &str, type_id: &str, payload: String) {
        self.data.set(key.to_string(), payload);
        self.type_info.set(key.to_string(), type_id.to_string());
    }

    /// Number of fields with a payload.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Payload of a list or map of containers.
///
/// `values` holds the wire document text of each element. For maps, `keys`
/// runs parallel to `values`; for lists it is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    #[serde(rename = "type")]
    pub type_id: String,
    pub element_type: String,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl CollectionPayload {
    pub(crate) fn new(type_id: &str, element_type: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            element_type: element_type.to_string(),
            keys: Vec::new(),
            values: Vec::new(),
        }
    }
}
