//! Value encoding.
//!
//! Every [`Value`] is encoded as a self-describing string payload paired
//! with its type identifier:
//!
//! | kind | payload |
//! |------|---------|
//! | null | empty string |
//! | scalars, geometric values, assets | JSON of the value |
//! | non-finite float | JSON string `"NaN"`, `"inf"` or `"-inf"` |
//! | container | JSON of its [`WireDocument`] |
//! | list / map of containers | JSON of a [`CollectionPayload`] |
//! | unknown type | the stored payload, verbatim |
//!
//! [`decode`] is strict. [`decode_or_default`] and whole-document decoding
//! recover from a bad payload by substituting the zero value of the declared
//! type, so one corrupt field never loses the rest of a document.
//!
//! Recursion through nested containers is bounded. Past the limit a nested
//! container is encoded as null and decoded as an empty container, and an
//! error is logged.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{error, warn};

use crate::{
    constants::*,
    container::{Container, ContainerError, DepthGuard, Value},
};

mod wire;

pub use wire::{CollectionPayload, WireDocument};

/// Encodes a single value into its payload string.
pub fn encode(value: &Value) -> Result<String, ContainerError> {
    encode_value(value, &mut DepthGuard::new(DEFAULT_MAX_DEPTH))
}

/// Decodes a payload written under `type_id`.
///
/// Unknown type identifiers decode to [`Value::Other`] and keep the payload.
pub fn decode(payload: &str, type_id: &str) -> Result<Value, ContainerError> {
    decode_value(payload, type_id, &mut DepthGuard::new(DEFAULT_MAX_DEPTH))
}

/// Like [`decode`], but falls back to [`Value::default_for`] with a warning.
pub fn decode_or_default(payload: &str, type_id: &str) -> Value {
    decode(payload, type_id).unwrap_or_else(|err| {
        warn!(type_id, error = %err, "Failed to decode value; using the type's default");
        Value::default_for(type_id)
    })
}

/// Encodes a container, descending at most `max_depth` nested levels.
pub fn encode_document(container: &Container, max_depth: usize) -> WireDocument {
    let mut guard = DepthGuard::new(max_depth);
    let document = document_within(container, &mut guard);
    if guard.exceeded() {
        error!(limit = max_depth, "Containers nested past the depth limit were encoded as null");
    }
    document
}

/// Decodes a wire document, descending at most `max_depth` nested levels.
pub fn decode_document(document: &WireDocument, max_depth: usize) -> Container {
    let mut guard = DepthGuard::new(max_depth);
    let container = container_within(document, &mut guard);
    if guard.exceeded() {
        error!(limit = max_depth, "Containers nested past the depth limit were decoded as empty");
    }
    container
}

fn document_within(container: &Container, guard: &mut DepthGuard) -> WireDocument {
    let mut document = WireDocument::default();
    for (key, value) in container.iter() {
        match encode_value(value, guard) {
            Ok(payload) => document.insert(key, value.type_id(), payload),
            Err(err) => {
                warn!(key = %key, error = %err, "Failed to encode value; writing null");
                document.insert(key, NULL_TYPE_ID, String::new());
            }
        }
    }
    document
}

fn container_within(document: &WireDocument, guard: &mut DepthGuard) -> Container {
    let mut container = Container::new();
    for (key, payload) in document.data.iter() {
        let Some(type_id) = document.type_info.get(key) else {
            warn!(key = %key, "Wire field has no type information; skipping");
            continue;
        };
        let value = decode_value(payload, type_id, guard).unwrap_or_else(|err| {
            warn!(key = %key, type_id = %type_id, error = %err, "Failed to decode field; using the type's default");
            Value::default_for(type_id)
        });
        if let Err(err) = container.set(key.as_str(), value) {
            warn!(key = %key, error = %err, "Skipping wire field");
        }
    }
    for key in document.type_info.keys() {
        if !document.data.contains_key(key) {
            warn!(key = %key, "Wire field has type information but no payload; skipping");
        }
    }
    container
}

pub(crate) fn encode_value(value: &Value, guard: &mut DepthGuard) -> Result<String, ContainerError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => to_json(BOOL_TYPE_ID, b),
        Value::Int(n) => to_json(INT_TYPE_ID, n),
        Value::Float(n) => encode_float(*n),
        Value::Text(s) => to_json(STRING_TYPE_ID, s),
        Value::Vec2(v) => to_json(VEC2_TYPE_ID, v),
        Value::Vec3(v) => to_json(VEC3_TYPE_ID, v),
        Value::Color(c) => to_json(COLOR_TYPE_ID, c),
        Value::Asset(asset) => to_json(ASSET_TYPE_ID, asset),
        Value::Container(child) => encode_child(child, guard),
        Value::List(list) => {
            let mut payload = CollectionPayload::new(LIST_TYPE_ID, CONTAINER_TYPE_ID);
            for child in list {
                payload.values.push(encode_child(child, guard)?);
            }
            to_json(LIST_TYPE_ID, &payload)
        }
        Value::Map(map) => {
            let mut payload = CollectionPayload::new(MAP_TYPE_ID, CONTAINER_TYPE_ID);
            for (key, child) in map.iter() {
                payload.keys.push(key.clone());
                payload.values.push(encode_child(child, guard)?);
            }
            to_json(MAP_TYPE_ID, &payload)
        }
        Value::Other { payload, .. } => Ok(payload.clone()),
    }
}

pub(crate) fn decode_value(
    payload: &str,
    type_id: &str,
    guard: &mut DepthGuard,
) -> Result<Value, ContainerError> {
    match type_id {
        NULL_TYPE_ID => Ok(Value::Null),
        BOOL_TYPE_ID => from_json(type_id, payload).map(Value::Bool),
        INT_TYPE_ID => from_json(type_id, payload).map(Value::Int),
        FLOAT_TYPE_ID => decode_float(payload).map(Value::Float),
        STRING_TYPE_ID => from_json(type_id, payload).map(Value::Text),
        VEC2_TYPE_ID => from_json(type_id, payload).map(Value::Vec2),
        VEC3_TYPE_ID => from_json(type_id, payload).map(Value::Vec3),
        COLOR_TYPE_ID => from_json(type_id, payload).map(Value::Color),
        ASSET_TYPE_ID => from_json(type_id, payload).map(Value::Asset),
        CONTAINER_TYPE_ID => decode_child(payload, guard).map(Value::Container),
        LIST_TYPE_ID => {
            let collection: CollectionPayload = from_json(type_id, payload)?;
            let list = collection
                .values
                .iter()
                .map(|element| decode_element(element, guard))
                .collect();
            Ok(Value::List(list))
        }
        MAP_TYPE_ID => {
            let collection: CollectionPayload = from_json(type_id, payload)?;
            if collection.keys.len() != collection.values.len() {
                warn!(
                    keys = collection.keys.len(),
                    values = collection.values.len(),
                    "Map payload has mismatched keys and values; extra entries dropped"
                );
            }
            let map = collection
                .keys
                .into_iter()
                .zip(collection.values.iter())
                .map(|(key, element)| (key, decode_element(element, guard)))
                .collect();
            Ok(Value::Map(map))
        }
        other => Ok(Value::Other {
            type_id: other.to_string(),
            payload: payload.to_string(),
        }),
    }
}

fn encode_child(child: &Container, guard: &mut DepthGuard) -> Result<String, ContainerError> {
    if !guard.enter() {
        return Err(ContainerError::DepthExceeded {
            limit: guard.limit(),
        });
    }
    let document = document_within(child, guard);
    guard.leave();
    to_json(CONTAINER_TYPE_ID, &document)
}

fn decode_child(payload: &str, guard: &mut DepthGuard) -> Result<Container, ContainerError> {
    if !guard.enter() {
        return Err(ContainerError::DepthExceeded {
            limit: guard.limit(),
        });
    }
    let decoded = from_json::<WireDocument>(CONTAINER_TYPE_ID, payload)
        .map(|document| container_within(&document, guard));
    guard.leave();
    decoded
}

/// Collection elements that fail to decode become empty containers.
fn decode_element(payload: &str, guard: &mut DepthGuard) -> Container {
    decode_child(payload, guard).unwrap_or_else(|err| {
        warn!(error = %err, "Failed to decode collection element; using an empty container");
        Container::new()
    })
}

/// JSON has no literal for NaN or the infinities, so those travel as strings.
fn encode_float(n: f64) -> Result<String, ContainerError> {
    if n.is_finite() {
        to_json(FLOAT_TYPE_ID, &n)
    } else {
        to_json(FLOAT_TYPE_ID, &n.to_string())
    }
}

fn decode_float(payload: &str) -> Result<f64, ContainerError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FloatPayload {
        Number(f64),
        Text(String),
    }

    match from_json(FLOAT_TYPE_ID, payload)? {
        FloatPayload::Number(n) => Ok(n),
        FloatPayload::Text(text) => match text.parse::<f64>() {
            Ok(n) if !n.is_finite() => Ok(n),
            _ => Err(ContainerError::CodecFailed {
                type_id: FLOAT_TYPE_ID.to_string(),
                reason: format!("'{text}' is not a number"),
            }),
        },
    }
}

fn to_json<T: Serialize + ?Sized>(type_id: &str, value: &T) -> Result<String, ContainerError> {
    serde_json::to_string(value).map_err(|e| ContainerError::CodecFailed {
        type_id: type_id.to_string(),
        reason: e.to_string(),
    })
}

fn from_json<T: DeserializeOwned>(type_id: &str, payload: &str) -> Result<T, ContainerError> {
    serde_json::from_str(payload).map_err(|e| ContainerError::CodecFailed {
        type_id: type_id.to_string(),
        reason: e.to_string(),
    })
}
