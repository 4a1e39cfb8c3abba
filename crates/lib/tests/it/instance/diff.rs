use templar::{
    Container,
    instance::{CollectionDiff, Instance, InstanceConfig, Override, diff},
};

use super::helpers::*;
use crate::helpers::named;

// ===== LEAF AND CONTAINER DIFFS =====

#[test]
fn test_diff_seeding_single_change() -> templar::Result<()> {
    let mut template = Container::new();
    template.set("a", 1)?;
    template.set("b", 3)?;
    let mut working = Container::new();
    working.set("a", 1)?;
    working.set("b", 2)?;

    let overrides = diff(&template, &working, &InstanceConfig::default());
    assert_eq!(overrides, vec![Override::new("b", "int", "2")]);
    Ok(())
}

#[test]
fn test_diff_recurses_into_containers() -> templar::Result<()> {
    let template = deep();
    let mut working = working_copy(&template);
    working.path_set("stats.hp", 45)?;
    working.path_set("stats.armor", 2)?;
    working.set("extra", true)?;

    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    let paths: Vec<&str> = overrides.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, vec!["stats.hp", "stats.armor", "extra"]);
    Ok(())
}

#[test]
fn test_keys_only_in_template_are_ignored() -> templar::Result<()> {
    let template = scenario();
    let mut working = working_copy(&template);
    working.remove("a");
    working.path_remove("b.c")?;

    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    assert!(overrides.is_empty());
    Ok(())
}

#[test]
fn test_type_change_records_whole_value() -> templar::Result<()> {
    let template = scenario();
    let mut working = working_copy(&template);
    working.set("b", 5)?;

    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    assert_eq!(overrides, vec![Override::new("b", "int", "5")]);
    Ok(())
}

// ===== COLLECTION DIFF MODES =====

#[test]
fn test_structural_mode_skips_identical_collections() {
    let template = deep();
    let working = working_copy(&template);
    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    assert!(overrides.is_empty());
}

#[test]
fn test_reference_mode_records_identical_collections() {
    let template = deep();
    let working = working_copy(&template);
    let config = InstanceConfig::default().with_collection_diff(CollectionDiff::Reference);

    let overrides = diff(template.borrow().container(), &working, &config);
    let paths: Vec<&str> = overrides.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, vec!["inventory", "slots"]);
}

#[test]
fn test_structural_mode_recurses_into_elements() -> templar::Result<()> {
    let template = deep();
    let mut working = working_copy(&template);
    working.path_set("inventory[1].enchant.level", 5)?;
    working.path_set(r#"slots["main hand"].item.name"#, "mace")?;
    working.path_set(r#"slots["belt"]"#, named("pouch"))?;

    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    let paths: Vec<&str> = overrides.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "inventory[1].enchant.level",
            r#"slots["main hand"].item.name"#,
            r#"slots["belt"]"#,
        ]
    );
    Ok(())
}

#[test]
fn test_reshaped_collections_are_recorded_whole() -> templar::Result<()> {
    let template = deep();
    let mut working = working_copy(&template);
    working.path_set("inventory[2]", named("torch"))?;
    working.path_remove(r#"slots["off hand"]"#)?;

    let overrides = diff(template.borrow().container(), &working, &InstanceConfig::default());
    let paths: Vec<&str> = overrides.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, vec!["inventory", "slots"]);
    assert_eq!(overrides[0].type_id, "list<container>");
    Ok(())
}

// ===== SEEDING INSTANCES =====

#[test]
fn test_seeded_instance_reproduces_working_copy() -> templar::Result<()> {
    for mode in [CollectionDiff::Structural, CollectionDiff::Reference] {
        let template = deep();
        let mut working = working_copy(&template);
        working.path_set("stats.hp", 99)?;
        working.path_set("inventory[1].name", "greatsword")?;
        working.path_set(r#"slots["belt"].item.name"#, "pouch")?;
        working.set("title", "boss")?;

        let config = InstanceConfig::default().with_collection_diff(mode);
        let mut instance = Instance::from_working_copy(template.clone(), &working, config);

        assert_eq!(*instance.runtime(), working, "{mode:?}");
        assert!(instance.replay_failures().is_empty());
    }
    Ok(())
}
