//! Helper functions for Instance testing

use templar::{
    Container,
    instance::{Instance, InstanceConfig, Template, TemplateHandle, WriteMode},
};

use crate::helpers::{deep_tree, scenario_template};

// ===== TEMPLATE SETUP HELPERS =====

/// Template handle for `{a: 1, b: {c: 2}}`
pub fn scenario() -> TemplateHandle {
    Template::new("scenario", scenario_template()).into_handle()
}

/// Template handle over the four-level test tree
pub fn deep() -> TemplateHandle {
    Template::new("deep", deep_tree()).into_handle()
}

// ===== INSTANCE SETUP HELPERS =====

/// Instance with the default (persistent) configuration
pub fn persistent(template: &TemplateHandle) -> Instance {
    Instance::new(template.clone(), InstanceConfig::default())
}

/// Instance whose plain `set` writes ephemerally
pub fn ephemeral(template: &TemplateHandle) -> Instance {
    Instance::new(
        template.clone(),
        InstanceConfig::default().with_write_mode(WriteMode::Ephemeral),
    )
}

/// Deep copy of the template's container, for building working copies
pub fn working_copy(template: &TemplateHandle) -> Container {
    template.borrow().container().deep_copy()
}

// ===== ASSERTION HELPERS =====

/// Assert the override paths, in application order
pub fn assert_override_paths(instance: &Instance, expected: &[&str]) {
    let paths: Vec<&str> = instance
        .overrides()
        .iter()
        .map(|entry| entry.path.as_str())
        .collect();
    assert_eq!(paths, expected);
}
