use templar::instance::{Instance, InstanceConfig, InstanceError, InstanceRecord, Override};

use super::helpers::*;

#[test]
fn test_record_round_trip() -> templar::Result<()> {
    let template = deep();
    let mut instance = persistent(&template);
    instance.set("stats.hp", 12)?;
    instance.set(r#"slots["main hand"].item.name"#, "club")?;

    let json = serde_json::to_string(&instance.to_record())?;
    let record: InstanceRecord = serde_json::from_str(&json)?;
    assert_eq!(record.template, "deep");

    let mut restored = Instance::from_record(template.clone(), record, InstanceConfig::default())?;
    assert_eq!(restored.overrides(), instance.overrides());
    assert_eq!(*restored.runtime(), *instance.runtime());
    Ok(())
}

#[test]
fn test_record_json_shape() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);
    instance.set("a", 10)?;

    let json = serde_json::to_value(instance.to_record())?;
    assert_eq!(
        json,
        serde_json::json!({
            "template": "scenario",
            "overrides": [{ "path": "a", "type": "int", "value": "10" }]
        })
    );
    Ok(())
}

#[test]
fn test_record_for_other_template_is_rejected() {
    let record = InstanceRecord {
        template: "someone-else".to_string(),
        overrides: vec![Override::new("a", "int", "3")],
    };
    let err = Instance::from_record(scenario(), record, InstanceConfig::default()).unwrap_err();
    match err {
        templar::Error::Instance(InstanceError::TemplateMismatch { expected, actual }) => {
            assert_eq!(expected, "scenario");
            assert_eq!(actual, "someone-else");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_override_list_accessors() -> templar::Result<()> {
    let template = scenario();
    let mut instance = persistent(&template);
    instance.set("a", 10)?;
    instance.set("b.c", 20)?;

    let list = instance.to_override_list();
    assert_eq!(list.len(), 2);
    assert!(instance.has_override("b.c"));
    assert!(!instance.has_override("b"));
    assert_eq!(instance.override_for("a"), Some(&list[0]));

    // Duplicate paths in a stored list collapse to the last entry
    let restored = Instance::from_overrides(
        template.clone(),
        [Override::new("a", "int", "1"), Override::new("a", "int", "2")],
        InstanceConfig::default(),
    );
    assert_eq!(restored.to_override_list(), vec![Override::new("a", "int", "2")]);
    Ok(())
}
