use templar::{
    Container, Path, Value,
    constants::MAX_LIST_GROWTH,
    container::{ContainerError, Vec3},
};

use crate::helpers::*;

// ===== READS =====

#[test]
fn test_path_reads() {
    let root = deep_tree();
    assert_eq!(root.path_get("stats.hp", 0), 30);
    assert_eq!(root.path_get("inventory[1].enchant.level", 0), 3);
    assert_eq!(root.path_get(r#"slots["main hand"].item.name"#, String::new()), "axe");
    assert_eq!(root.path_try_get::<f64>("stats.speed"), Some(1.25));
}

#[test]
fn test_missing_paths_return_default() {
    let root = deep_tree();
    assert_eq!(root.path_get("stats.mana", -1), -1);
    assert_eq!(root.path_get("inventory[7].name", String::from("none")), "none");
    assert_eq!(root.path_get(r#"slots["belt"].item"#, 5), 5);
    // Type mismatch and malformed path both fall back
    assert_eq!(root.path_get("stats.hp", String::from("fallback")), "fallback");
    assert_eq!(root.path_get("stats..hp", 0), 0);
    assert!(!root.path_contains("stats.hp.deeper"));
}

#[test]
fn test_strict_lookup_reports_reason() {
    let root = deep_tree();
    let err = root.path_lookup("inventory[7]").unwrap_err();
    assert!(err.is_navigation_error());
    assert!(err.is_not_found());

    let err = root.path_lookup("stats[0]").unwrap_err();
    match err {
        templar::Error::Container(ContainerError::PathNavigation { path, reason }) => {
            assert_eq!(path, "stats[0]");
            assert!(reason.contains("list"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_lookup_of_elements_returns_containers() -> templar::Result<()> {
    let root = deep_tree();
    let element = root.path_lookup("inventory[0]")?.into_owned();
    assert_eq!(element, Value::Container(named("rope")));
    assert_eq!(root.path_lookup("stats.hp")?.as_int(), Some(30));
    Ok(())
}

// ===== WRITES =====

#[test]
fn test_auto_grow_list() -> templar::Result<()> {
    let mut c = Container::new();
    let x = named("x");
    c.path_set("list[5]", x.clone())?;

    let list = c.get("list").and_then(Value::as_list).expect("list created");
    assert_eq!(list.len(), 6);
    assert!(list[..5].iter().all(Container::is_empty));
    assert_eq!(list[5], x);
    Ok(())
}

#[test]
fn test_auto_grow_intermediate_segments() -> templar::Result<()> {
    let mut c = Container::new();
    c.path_set(r#"zones["north"].spawns[2].position"#, Vec3::new(1.0, 0.0, 4.0))?;

    assert_eq!(c.value_type("zones"), Some("map<string,container>"));
    assert_eq!(
        c.path_try_get::<Vec3>(r#"zones["north"].spawns[2].position"#),
        Some(Vec3::new(1.0, 0.0, 4.0))
    );
    assert!(c.path_contains(r#"zones["north"].spawns[0]"#));
    assert!(!c.path_contains(r#"zones["north"].spawns[3]"#));
    Ok(())
}

#[test]
fn test_far_list_index_is_rejected() -> templar::Result<()> {
    let mut c = deep_tree();
    let before = c.clone();

    let huge = format!("inventory[{}]", usize::MAX);
    let err = c.path_set(huge.as_str(), Container::new()).unwrap_err();
    assert!(err.is_navigation_error());

    let far = format!("fresh[{}].name", MAX_LIST_GROWTH);
    assert!(c.path_set(far.as_str(), "x").unwrap_err().is_navigation_error());
    assert!(c.path_set("inventory[0].tags[1000000000000]", Container::new()).is_err());
    assert_eq!(c, before);

    // Growth is measured from the current end of the list
    let len = c.get("inventory").and_then(Value::as_list).map_or(0, Vec::len);
    let last = format!("inventory[{}]", len + MAX_LIST_GROWTH - 1);
    c.path_set(last.as_str(), named("far"))?;
    assert_eq!(
        c.get("inventory").and_then(Value::as_list).map(Vec::len),
        Some(len + MAX_LIST_GROWTH)
    );
    Ok(())
}

#[test]
fn test_non_container_at_terminal_accessor_is_an_error() {
    let mut c = deep_tree();
    let before = c.clone();

    let err = c.path_set("inventory[0]", "rope").unwrap_err();
    assert!(matches!(
        err,
        templar::Error::Container(ContainerError::NonContainerElement { .. })
    ));
    let err = c.path_set(r#"slots["new"]"#, 3).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(c, before);
}

#[test]
fn test_path_idempotence() -> templar::Result<()> {
    let mut root = deep_tree();
    let before = root.clone();
    for path in [
        "stats.hp",
        "title",
        "inventory[1].enchant",
        "inventory[0]",
        r#"slots["main hand"].item.mesh"#,
        "curve",
    ] {
        let value = root.path_lookup(path)?.into_owned();
        root.path_set(path, value)?;
    }
    assert_eq!(root, before);
    assert_eq!(root.get("inventory").and_then(Value::as_list).map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_write_returns_previous_value() -> templar::Result<()> {
    let mut c = Container::new();
    assert_eq!(c.path_set("a.b", 1)?, None);
    assert_eq!(c.path_set("a.b", 2)?, Some(Value::Int(1)));
    assert_eq!(c.path_set(r#"m["k"]"#, named("one"))?, None);
    assert_eq!(
        c.path_set(r#"m["k"]"#, named("two"))?,
        Some(Value::Container(named("one")))
    );
    Ok(())
}

#[test]
fn test_paths_accept_parsed_values() -> templar::Result<()> {
    let mut c = Container::new();
    let path = Path::new().property("slots").key("a.b").property("x");
    c.path_set(&path, 1)?;
    assert_eq!(c.path_get(&path, 0), 1);
    // The same key is reachable through its quoted spelling
    assert_eq!(c.path_get(r#"slots["a.b"].x"#, 0), 1);
    Ok(())
}

// ===== REMOVAL =====

#[test]
fn test_path_remove() -> templar::Result<()> {
    let mut root = deep_tree();

    let removed = root.path_remove("inventory[0]")?;
    assert_eq!(removed, Some(Value::Container(named("rope"))));
    assert_eq!(root.path_get("inventory[0].name", String::new()), "sword");

    assert!(root.path_remove(r#"slots["off hand"]"#)?.is_some());
    assert!(!root.path_contains(r#"slots["off hand"]"#));
    assert!(root.path_contains(r#"slots["main hand"]"#));

    assert_eq!(root.path_remove("stats.mana")?, None);
    assert_eq!(root.path_remove("nothing.here")?, None);
    Ok(())
}
