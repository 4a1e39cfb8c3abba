//! Structural diff between a template container and a working copy.
//!
//! The diff walks the working copy's keys. Keys that exist only in the
//! template are ignored: an instance cannot express "removed" with an
//! override, so the template value simply shows through.

use tracing::{debug, error, warn};

use super::{
    config::{CollectionDiff, InstanceConfig},
    overrides::Override,
};
use crate::{
    container::{Container, DepthGuard, Value},
    ordered::OrderedMap,
    path::Path,
};

/// Computes the overrides that turn `template` into `working`.
///
/// Overrides come out in the working copy's key order, depth first.
///
/// # Example
///
/// ```
/// use templar::{container::Container, instance::{InstanceConfig, diff}};
///
/// let mut template = Container::new();
/// template.set("a", 1)?;
/// template.set("b", 3)?;
/// let mut working = template.clone();
/// working.set("b", 2)?;
///
/// let overrides = diff(&template, &working, &InstanceConfig::default());
/// assert_eq!(overrides.len(), 1);
/// assert_eq!((overrides[0].path.as_str(), overrides[0].value.as_str()), ("b", "2"));
/// # Ok::<(), templar::Error>(())
/// ```
pub fn diff(template: &Container, working: &Container, config: &InstanceConfig) -> Vec<Override> {
    let mut differ = Differ {
        collections: config.collection_diff,
        guard: DepthGuard::new(config.max_depth),
        overrides: Vec::new(),
    };
    differ.containers(&Path::new(), template, working);
    if differ.guard.exceeded() {
        error!(
            limit = config.max_depth,
            "Diff reached the depth limit; deeper containers were recorded whole"
        );
    }
    debug!(overrides = differ.overrides.len(), "Computed instance diff");
    differ.overrides
}

struct Differ {
    collections: CollectionDiff,
    guard: DepthGuard,
    overrides: Vec<Override>,
}

impl Differ {
    fn containers(&mut self, base: &Path, template: &Container, working: &Container) {
        for (key, value) in working.iter() {
            if key.contains(['.', '[', ']']) {
                warn!(
                    key = %key,
                    "Key contains path delimiters; its override cannot be replayed by path"
                );
            }
            let path = base.clone().property(key.clone());

            match (template.get(key), value) {
                (None, _) => self.record(&path, value),
                (Some(Value::Container(t)), Value::Container(w)) => self.nested(&path, t, w),
                (Some(Value::List(t)), Value::List(w)) => self.lists(&path, t, w, value),
                (Some(Value::Map(t)), Value::Map(w)) => self.maps(&path, t, w, value),
                (Some(base_value), _) => {
                    if base_value != value {
                        self.record(&path, value);
                    }
                }
            }
        }
    }

    fn nested(&mut self, path: &Path, template: &Container, working: &Container) {
        if !self.guard.enter() {
            self.record(path, &Value::Container(working.clone()));
            return;
        }
        self.containers(path, template, working);
        self.guard.leave();
    }

    fn lists(&mut self, path: &Path, template: &[Container], working: &[Container], whole: &Value) {
        if self.collections == CollectionDiff::Reference || template.len() != working.len() {
            self.record(path, whole);
            return;
        }
        for (index, (t, w)) in template.iter().zip(working).enumerate() {
            self.nested(&path.clone().index(index), t, w);
        }
    }

    fn maps(
        &mut self,
        path: &Path,
        template: &OrderedMap<String, Container>,
        working: &OrderedMap<String, Container>,
        whole: &Value,
    ) {
        let covers_template = template.keys().all(|key| working.contains_key(key));
        if self.collections == CollectionDiff::Reference || !covers_template {
            self.record(path, whole);
            return;
        }
        for (key, w) in working.iter() {
            let entry = path.clone().key(key.clone());
            match template.get(key) {
                Some(t) => self.nested(&entry, t, w),
                None => self.record(&entry, &Value::Container(w.clone())),
            }
        }
    }

    fn record(&mut self, path: &Path, value: &Value) {
        match Override::from_value(path, value) {
            Ok(entry) => self.overrides.push(entry),
            Err(err) => warn!(path = %path, error = %err, "Could not encode override; skipping"),
        }
    }
}
