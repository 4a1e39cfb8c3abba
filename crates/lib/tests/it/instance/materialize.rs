use templar::{
    Container, Path, Value,
    instance::{Instance, InstanceConfig, Override},
};

use super::helpers::*;
use crate::helpers::named;

fn expected_scenario() -> Container {
    let mut c = Container::new();
    c.set("a", 10).unwrap();
    c.path_set("b.c", 20).unwrap();
    c
}

#[test]
fn test_materialization_replays_overrides() -> templar::Result<()> {
    let template = scenario();
    let mut instance = Instance::from_overrides(
        template.clone(),
        [Override::new("a", "int", "10"), Override::new("b.c", "int", "20")],
        InstanceConfig::default(),
    );

    assert_eq!(*instance.runtime(), expected_scenario());

    assert!(instance.remove_override("a")?);
    assert_eq!(instance.get("a", 0), 1);
    assert_eq!(instance.get("b.c", 0), 20);

    // The template itself never changes
    assert_eq!(template.borrow().container().path_get("b.c", 0), 2);
    Ok(())
}

#[test]
fn test_override_precedence() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);

    instance.set("x.y", 1)?;
    instance.set("a", 5)?;
    instance.set("x.y", 2)?;

    assert_override_paths(&instance, &["a", "x.y"]);
    assert_eq!(instance.override_for("x.y").map(|o| o.value.as_str()), Some("2"));
    assert_eq!(instance.get("x.y", 0), 2);
    Ok(())
}

#[test]
fn test_later_overrides_apply_on_top() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);

    let mut replacement = Container::new();
    replacement.set("c", 3)?;
    replacement.set("d", 4)?;
    instance.set_override("b", replacement)?;
    instance.set_override("b.d", 40)?;

    assert_eq!(instance.get("b.c", 0), 3);
    assert_eq!(instance.get("b.d", 0), 40);
    Ok(())
}

#[test]
fn test_stale_override_is_skipped() -> templar::Result<()> {
    let template = scenario();
    let mut instance = Instance::from_overrides(
        template.clone(),
        [
            // Only containers can be stored at a list index
            Override::new("b[0]", "int", "1"),
            Override::new("a", "int", "not a number"),
            Override::new("b..c", "int", "3"),
            Override::new("b.c", "int", "30"),
        ],
        InstanceConfig::default(),
    );

    assert_eq!(instance.get("b.c", 0), 30);
    assert_eq!(instance.get("a", 0), 1);

    let failed: Vec<&str> = instance
        .replay_failures()
        .iter()
        .filter_map(|err| err.path())
        .collect();
    assert_eq!(failed, vec!["b[0]", "a", "b..c"]);
    assert!(instance.replay_failures().iter().all(|err| err.is_replay_failure()));
    Ok(())
}

#[test]
fn test_far_list_index_override_is_skipped() -> templar::Result<()> {
    let template = deep();
    let far = Path::parse("inventory[1000000000000]")?;
    let mut instance = Instance::from_overrides(
        template.clone(),
        [
            Override::from_value(&far, &Value::Container(Container::new()))?,
            Override::new("stats.hp", "int", "12"),
        ],
        InstanceConfig::default(),
    );

    assert_eq!(instance.get("stats.hp", 0), 12);
    let inventory = instance.value("inventory").expect("inventory exists");
    assert_eq!(inventory.as_list().map(Vec::len), Some(2));

    let failed: Vec<&str> = instance
        .replay_failures()
        .iter()
        .filter_map(|err| err.path())
        .collect();
    assert_eq!(failed, vec!["inventory[1000000000000]"]);
    Ok(())
}

#[test]
fn test_template_edits_show_through() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);
    instance.set("a", 10)?;
    assert_eq!(instance.get("b.c", 0), 2);

    template.borrow_mut().container_mut().path_set("b.c", 7)?;
    template.borrow_mut().container_mut().set("e", "new")?;

    assert!(!instance.is_materialized());
    assert_eq!(instance.get("b.c", 0), 7);
    assert_eq!(instance.get("e", String::new()), "new");
    assert_eq!(instance.get("a", 0), 10);
    Ok(())
}

#[test]
fn test_removing_child_override_under_parent_override() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);

    let mut replacement = Container::new();
    replacement.set("c", 5)?;
    instance.set_override("b", replacement)?;
    instance.set_override("b.c", 9)?;
    assert_eq!(instance.get("b.c", 0), 9);
    assert!(instance.is_materialized());

    assert!(instance.remove_override("b.c")?);
    assert_eq!(instance.get("b.c", 0), 5);

    // A full rebuild agrees with the incremental result
    instance.invalidate();
    assert_eq!(instance.get("b.c", 0), 5);
    assert_override_paths(&instance, &["b"]);
    Ok(())
}

#[test]
fn test_removing_list_element_override_rebuilds() -> templar::Result<()> {
    let template = deep();
    let mut instance = persistent(&template);
    instance.set("inventory[3]", named("torch"))?;
    assert_eq!(instance.get("inventory[3].name", String::new()), "torch");

    instance.remove_override("inventory[3]")?;
    assert!(!instance.is_materialized());
    let inventory = instance.value("inventory").expect("inventory exists");
    assert_eq!(inventory.as_list().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_clear_overrides() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);
    instance.set("a", 10)?;
    instance.set("b.c", 20)?;

    instance.clear_overrides();
    assert!(instance.overrides().is_empty());
    assert_eq!(*instance.runtime(), *template.borrow().container());
    assert_eq!(instance.value("a"), Some(Value::Int(1)));
    Ok(())
}
