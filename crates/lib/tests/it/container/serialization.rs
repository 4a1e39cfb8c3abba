use templar::{
    Container, Value,
    codec::{self, WireDocument},
};

use crate::helpers::*;

/// Every path reachable in `expected` must hold an equal value with an equal type in `actual`.
fn assert_same_at_every_path(expected: &Container, actual: &Container, prefix: &str) {
    assert_eq!(expected.keys(), actual.keys(), "key order under '{prefix}'");
    for (key, value) in expected.iter() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let other = actual.get(key).unwrap_or_else(|| panic!("missing '{path}'"));
        assert_eq!(value.type_id(), other.type_id(), "type at '{path}'");
        assert_eq!(value, other, "value at '{path}'");
        if let (Value::Container(e), Value::Container(a)) = (value, other) {
            assert_same_at_every_path(e, a, &path);
        }
    }
}

#[test]
fn test_round_trip_depth_four() -> templar::Result<()> {
    let original = deep_tree();
    let text = original.to_wire_string()?;
    let restored = Container::from_wire_str(&text);

    assert_eq!(restored, original);
    assert_same_at_every_path(&original, &restored, "");
    assert_eq!(
        restored.path_get(r#"slots["main hand"].item.name"#, String::new()),
        "axe"
    );
    Ok(())
}

#[test]
fn test_document_shape() -> templar::Result<()> {
    let mut c = Container::new();
    c.set("hp", 30)?;
    c.set("gone", Value::Null)?;
    c.path_set("stats.speed", 1.5)?;

    let document = c.to_wire_format();
    assert_eq!(document.data.get("hp").map(String::as_str), Some("30"));
    assert_eq!(document.type_info.get("hp").map(String::as_str), Some("int"));
    assert_eq!(document.data.get("gone").map(String::as_str), Some(""));
    assert_eq!(document.type_info.get("gone").map(String::as_str), Some("null"));

    // Nested containers are embedded as their own document text
    let nested: WireDocument = serde_json::from_str(&document.data.get("stats").cloned().unwrap_or_default())?;
    assert_eq!(nested.type_info.get("speed").map(String::as_str), Some("float"));
    Ok(())
}

#[test]
fn test_collection_payload_uses_parallel_arrays() -> templar::Result<()> {
    let root = deep_tree();
    let payload = codec::encode(root.get("slots").expect("slots exists"))?;
    let collection: codec::CollectionPayload = serde_json::from_str(&payload)?;

    assert_eq!(collection.type_id, "map<string,container>");
    assert_eq!(collection.element_type, "container");
    assert_eq!(collection.keys, vec!["main hand", "off hand"]);
    assert_eq!(collection.values.len(), 2);

    let list = codec::encode(root.get("inventory").expect("inventory exists"))?;
    let collection: codec::CollectionPayload = serde_json::from_str(&list)?;
    assert!(collection.keys.is_empty());
    assert_eq!(collection.values.len(), 2);
    Ok(())
}

#[test]
fn test_empty_and_malformed_documents() {
    assert!(Container::from_wire_str("").is_empty());
    assert!(Container::from_wire_str("   ").is_empty());
    assert!(Container::from_wire_str("{not json").is_empty());
    assert!(Container::from_wire_str("{}").is_empty());
}

#[test]
fn test_partial_recovery() {
    let text = r#"{
        "data": {
            "hp": "thirty",
            "name": "\"orc\"",
            "stats": "{\"data\":{\"speed\":\"fast\"},\"typeInfo\":{\"speed\":\"float\"}}",
            "orphan": "1",
            "items": "not a payload"
        },
        "typeInfo": {
            "hp": "int",
            "name": "string",
            "stats": "container",
            "items": "list<container>",
            "ghost": "int"
        }
    }"#;
    let c = Container::from_wire_str(text);

    assert_eq!(c.get("hp"), Some(&Value::Int(0)));
    assert_eq!(c.get_or("name", ""), "orc");
    assert_eq!(c.path_get("stats.speed", -1.0), 0.0);
    assert!(!c.contains("orphan"));
    assert!(!c.contains("ghost"));
    assert_eq!(c.get("items"), Some(&Value::List(Vec::new())));
}

#[test]
fn test_unknown_types_survive_round_trip() -> templar::Result<()> {
    let original = every_leaf();
    let restored = Container::from_wire_str(&original.to_wire_string()?);
    assert_eq!(
        restored.get("curve"),
        Some(&Value::Other {
            type_id: "curve:v1".to_string(),
            payload: "[0.0,0.5,1.0]".to_string(),
        })
    );
    Ok(())
}
