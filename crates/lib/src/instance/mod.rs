//! Templates and override-only instances.
//!
//! A [`Template`] owns the baseline [`Container`] shared by many instances.
//! An [`Instance`] stores only its [`Override`]s and rebuilds an effective
//! runtime container on demand by deep-copying the template and replaying
//! the overrides in order.
//!
//! The runtime container is a cache. It is dropped whenever the override
//! list changes and rebuilt on the next read; it is also rebuilt when the
//! template has been mutated since it was built.
//!
//! # Usage
//!
//! ```
//! use templar::{container::Container, instance::{Instance, InstanceConfig, Template}};
//!
//! let mut base = Container::new();
//! base.set("a", 1)?;
//! base.path_set("b.c", 2)?;
//! let template = Template::new("orc", base).into_handle();
//!
//! let mut orc = Instance::new(template, InstanceConfig::default());
//! orc.set("a", 10)?;
//! orc.set("b.c", 20)?;
//! assert_eq!(orc.overrides().len(), 2);
//!
//! orc.remove_override("a")?;
//! assert_eq!(orc.get("a", 0), 1);
//! assert_eq!(orc.get("b.c", 0), 20);
//! # Ok::<(), templar::Error>(())
//! ```

use std::{borrow::Cow, cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    Result,
    container::{Container, ContainerError, Value},
    path::{AsPath, Path},
};

pub mod config;
mod diff;
pub mod errors;
pub mod overrides;

pub use config::{CollectionDiff, InstanceConfig, WriteMode};
pub use diff::diff;
pub use errors::InstanceError;
pub use overrides::{Override, OverrideList};

/// Shared handle to a template.
pub type TemplateHandle = Rc<RefCell<Template>>;

/// The baseline container shared by instances.
#[derive(Debug, Clone)]
pub struct Template {
    id: String,
    container: Container,
    revision: u64,
}

impl Template {
    pub fn new(id: impl Into<String>, container: Container) -> Self {
        Self {
            id: id.into(),
            container,
            revision: 0,
        }
    }

    /// Identifier persisted in instance records.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable access to the template data.
    ///
    /// Every call bumps the revision, so instances rebuild their runtime
    /// containers on their next read.
    pub fn container_mut(&mut self) -> &mut Container {
        self.revision += 1;
        &mut self.container
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_handle(self) -> TemplateHandle {
        Rc::new(RefCell::new(self))
    }
}

/// What a host persists for an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Template identifier.
    pub template: String,
    pub overrides: Vec<Override>,
}

#[derive(Debug)]
struct Runtime {
    container: Container,
    /// Template revision the container was built from.
    revision: u64,
}

/// An override-only view of a template.
#[derive(Debug)]
pub struct Instance {
    template: TemplateHandle,
    overrides: OverrideList,
    config: InstanceConfig,
    runtime: Option<Runtime>,
    /// Pre-session values of ephemerally written paths; `None` means absent.
    original_values: HashMap<String, Option<Value>>,
    replay_failures: Vec<InstanceError>,
}

impl Instance {
    /// Creates an instance with no overrides.
    pub fn new(template: TemplateHandle, config: InstanceConfig) -> Self {
        Self {
            template,
            overrides: OverrideList::new(),
            config,
            runtime: None,
            original_values: HashMap::new(),
            replay_failures: Vec::new(),
        }
    }

    /// Creates an instance whose overrides reproduce `working`.
    ///
    /// `working` is typically a modified deep copy of the template's
    /// container; only the differences are kept.
    pub fn from_working_copy(
        template: TemplateHandle,
        working: &Container,
        config: InstanceConfig,
    ) -> Self {
        let overrides = diff(template.borrow().container(), working, &config);
        Self::from_overrides(template, overrides, config)
    }

    /// Creates an instance from previously recorded overrides.
    pub fn from_overrides(
        template: TemplateHandle,
        overrides: impl IntoIterator<Item = Override>,
        config: InstanceConfig,
    ) -> Self {
        let mut instance = Self::new(template, config);
        instance.overrides = overrides.into_iter().collect();
        instance
    }

    /// Restores an instance from a persisted record.
    pub fn from_record(
        template: TemplateHandle,
        record: InstanceRecord,
        config: InstanceConfig,
    ) -> Result<Self> {
        let expected = template.borrow().id().to_string();
        if record.template != expected {
            return Err(InstanceError::TemplateMismatch {
                expected,
                actual: record.template,
            }
            .into());
        }
        Ok(Self::from_overrides(template, record.overrides, config))
    }

    /// The persistable state of this instance.
    pub fn to_record(&self) -> InstanceRecord {
        InstanceRecord {
            template: self.template.borrow().id().to_string(),
            overrides: self.to_override_list(),
        }
    }

    pub fn template(&self) -> &TemplateHandle {
        &self.template
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    pub fn overrides(&self) -> &OverrideList {
        &self.overrides
    }

    /// Copy of the override list in application order.
    pub fn to_override_list(&self) -> Vec<Override> {
        self.overrides.as_slice().to_vec()
    }

    pub fn override_for(&self, path: impl AsPath) -> Option<&Override> {
        let path = path.as_path().ok()?;
        self.overrides.get(&path.to_string())
    }

    pub fn has_override(&self, path: impl AsPath) -> bool {
        self.override_for(path).is_some()
    }

    /// Records an override without touching the runtime container's contents.
    ///
    /// The runtime container is invalidated and rebuilt on the next read.
    pub fn set_override(&mut self, path: impl AsPath, value: impl Into<Value>) -> Result<()> {
        let path = path.as_path()?;
        let entry = Override::from_value(&path, &value.into())?;
        trace!(path = %entry.path, type_id = %entry.type_id, "Recording override");
        self.overrides.set(entry);
        self.invalidate();
        Ok(())
    }

    /// Drops the override at `path`. Returns false if there was none.
    ///
    /// A materialized runtime container is patched back to the template
    /// value at `path` instead of being rebuilt, unless another override
    /// still replaces a location above or inside `path`.
    pub fn remove_override(&mut self, path: impl AsPath) -> Result<bool> {
        let path = path.as_path()?;
        let key = path.to_string();
        if self.overrides.remove(&key).is_none() {
            return Ok(false);
        }
        if self.is_materialized() && !self.overrides.overlaps(&key) {
            self.patch_from_template(&path);
        } else {
            self.invalidate();
        }
        Ok(true)
    }

    /// Drops every override.
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
        self.invalidate();
    }

    /// Discards the runtime container.
    pub fn invalidate(&mut self) {
        if self.runtime.take().is_some() {
            trace!("Invalidated runtime container");
        }
    }

    /// Returns true if a runtime container exists for the current template revision.
    pub fn is_materialized(&self) -> bool {
        let revision = self.template.borrow().revision();
        self.runtime
            .as_ref()
            .is_some_and(|runtime| runtime.revision == revision)
    }

    /// The effective container, rebuilt first if needed.
    pub fn runtime(&mut self) -> &Container {
        self.materialized()
    }

    /// Typed read from the effective container that falls back to `default`.
    pub fn get<T>(&mut self, path: impl AsPath, default: T) -> T
    where
        T: for<'v> TryFrom<&'v Value, Error = ContainerError>,
    {
        self.materialized().path_get(path, default)
    }

    /// Typed read from the effective container.
    pub fn try_get<T>(&mut self, path: impl AsPath) -> Option<T>
    where
        T: for<'v> TryFrom<&'v Value, Error = ContainerError>,
    {
        self.materialized().path_try_get(path)
    }

    /// Copy of the effective value at `path`.
    pub fn value(&mut self, path: impl AsPath) -> Option<Value> {
        self.materialized()
            .path_lookup(path)
            .ok()
            .map(Cow::into_owned)
    }

    /// Writes using the configured [`WriteMode`].
    pub fn set(&mut self, path: impl AsPath, value: impl Into<Value>) -> Result<()> {
        self.set_with_mode(path, value, self.config.write_mode)
    }

    /// Writes with an explicit [`WriteMode`].
    ///
    /// A persistent write of the template's own value removes the override
    /// instead of recording one, as long as no other override replaces a
    /// location above or inside `path`. Otherwise the write is recorded like
    /// any other.
    pub fn set_with_mode(
        &mut self,
        path: impl AsPath,
        value: impl Into<Value>,
        mode: WriteMode,
    ) -> Result<()> {
        let path = path.as_path()?.into_owned();
        let value = value.into();

        match mode {
            WriteMode::Persistent => {
                let template_value = self
                    .template
                    .borrow()
                    .container()
                    .path_lookup(&path)
                    .ok()
                    .map(Cow::into_owned);
                let key = path.to_string();
                if template_value.as_ref() == Some(&value) && !self.overrides.overlaps(&key) {
                    debug!(path = %path, "Value matches the template; dropping override");
                    self.remove_override(&path)?;
                    return Ok(());
                }
                self.materialized().path_set(&path, value.clone())?;
                let entry = Override::from_value(&path, &value)?;
                trace!(path = %entry.path, type_id = %entry.type_id, "Recording override");
                self.overrides.set(entry);
                self.invalidate();
            }
            WriteMode::Ephemeral => {
                let runtime = self.materialized();
                let current = runtime.path_lookup(&path).ok().map(Cow::into_owned);
                runtime.path_set(&path, value)?;
                self.original_values
                    .entry(path.to_string())
                    .or_insert(current);
            }
        }
        Ok(())
    }

    /// The value `path` held before its first ephemeral write.
    ///
    /// `None` if the path was not tracked or did not exist then; use
    /// [`Instance::is_tracked`] to tell the two apart.
    pub fn original_value(&self, path: impl AsPath) -> Option<&Value> {
        let path = path.as_path().ok()?;
        self.original_values.get(&path.to_string())?.as_ref()
    }

    /// Returns true if `path` has been written ephemerally.
    pub fn is_tracked(&self, path: impl AsPath) -> bool {
        path.as_path()
            .is_ok_and(|path| self.original_values.contains_key(&path.to_string()))
    }

    pub fn clear_original_values(&mut self) {
        self.original_values.clear();
    }

    /// Overrides skipped by the most recent materialization.
    pub fn replay_failures(&self) -> &[InstanceError] {
        &self.replay_failures
    }

    fn materialized(&mut self) -> &mut Container {
        let revision = self.template.borrow().revision();
        let runtime = match self.runtime.take() {
            Some(runtime) if runtime.revision == revision => runtime,
            _ => Runtime {
                container: self.rebuild(),
                revision,
            },
        };
        &mut self.runtime.insert(runtime).container
    }

    fn rebuild(&mut self) -> Container {
        let mut container = self
            .template
            .borrow()
            .container()
            .deep_copy_with_limit(self.config.max_depth);

        self.replay_failures.clear();
        for entry in self.overrides.iter() {
            if let Err(err) = replay(&mut container, entry) {
                warn!(
                    path = %entry.path,
                    type_id = %entry.type_id,
                    error = %err,
                    "Skipping override that no longer applies"
                );
                self.replay_failures.push(InstanceError::OverrideReplayFailed {
                    path: entry.path.clone(),
                    reason: err.to_string(),
                });
            }
        }
        debug!(
            overrides = self.overrides.len(),
            skipped = self.replay_failures.len(),
            "Materialized instance"
        );
        container
    }

    /// Restores the runtime value at `path` to the template's.
    fn patch_from_template(&mut self, path: &Path) {
        let template_value = self
            .template
            .borrow()
            .container()
            .path_lookup(path)
            .ok()
            .map(Cow::into_owned);
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };
        let patched = match template_value {
            Some(value) => runtime.container.path_set(path, value).map(|_| ()),
            // Absent from the template; removing a list element would shift
            // its siblings, so rebuild instead
            None => Err(ContainerError::navigation(path, "not present in the template").into()),
        };
        if let Err(err) = patched {
            debug!(path = %path, error = %err, "Could not patch runtime container; rebuilding");
            self.invalidate();
        }
    }
}

fn replay(container: &mut Container, entry: &Override) -> Result<()> {
    let path = entry.parsed_path()?;
    let value = entry.decode()?;
    container.path_set(&path, value)?;
    Ok(())
}
