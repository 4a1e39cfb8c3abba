use templar::{
    Container, Value,
    container::{AssetRef, Color, Vec2, Vec3},
};

// ==========================
// CONTAINER FACTORIES
// ==========================

/// Creates a container holding `name` under the `name` key.
pub fn named(name: &str) -> Container {
    let mut c = Container::new();
    c.set("name", name).unwrap();
    c
}

/// Creates a container holding one value of every leaf kind.
pub fn every_leaf() -> Container {
    let mut c = Container::new();
    c.set("null", Value::Null).unwrap();
    c.set("flag", true).unwrap();
    c.set("count", 42).unwrap();
    c.set("ratio", 0.25).unwrap();
    c.set("title", "héllo \"quoted\"").unwrap();
    c.set("offset", Vec2::new(1.5, -2.0)).unwrap();
    c.set("position", Vec3::new(1.0, 2.0, 3.0)).unwrap();
    c.set("tint", Color::rgba(0.1, 0.2, 0.3, 0.4)).unwrap();
    c.set("mesh", AssetRef::new("meshes/orc.glb")).unwrap();
    c.set(
        "curve",
        Value::Other {
            type_id: "curve:v1".to_string(),
            payload: "[0.0,0.5,1.0]".to_string(),
        },
    )
    .unwrap();
    c
}

/// Creates a four-level tree mixing every branch kind with leaves.
///
/// ```text
/// root
/// ├── stats { hp, speed }
/// ├── inventory [ {name}, {name, enchant {level, tint}} ]
/// └── slots { "main hand": {item {name, mesh}}, "off hand": {} }
/// ```
pub fn deep_tree() -> Container {
    let mut root = every_leaf();
    root.path_set("stats.hp", 30).unwrap();
    root.path_set("stats.speed", 1.25).unwrap();
    root.path_set("inventory[0].name", "rope").unwrap();
    root.path_set("inventory[1].name", "sword").unwrap();
    root.path_set("inventory[1].enchant.level", 3).unwrap();
    root.path_set("inventory[1].enchant.tint", Color::BLACK).unwrap();
    root.path_set(r#"slots["main hand"].item.name"#, "axe").unwrap();
    root.path_set(r#"slots["main hand"].item.mesh"#, AssetRef::new("meshes/axe.glb"))
        .unwrap();
    root.path_set(r#"slots["off hand"]"#, Container::new()).unwrap();
    root
}

/// Template of the materialization scenario: `{a: 1, b: {c: 2}}`.
pub fn scenario_template() -> Container {
    let mut c = Container::new();
    c.set("a", 1).unwrap();
    c.path_set("b.c", 2).unwrap();
    c
}
