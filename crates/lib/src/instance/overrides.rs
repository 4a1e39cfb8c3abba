//! Override entries and the per-instance override list.

use serde::{Deserialize, Serialize};

use crate::{
    codec,
    container::{ContainerError, Value},
    path::{Path, PathError},
};

/// A recorded deviation from the template: a path, a type identifier and
/// the encoded value.
///
/// `path` is the canonical [`Path`] string, so two spellings of the same
/// address always collapse into one override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    pub path: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub value: String,
}

impl Override {
    pub fn new(
        path: impl Into<String>,
        type_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            type_id: type_id.into(),
            value: value.into(),
        }
    }

    /// Encodes `value` as an override at `path`.
    pub fn from_value(path: &Path, value: &Value) -> Result<Self, ContainerError> {
        Ok(Self {
            path: path.to_string(),
            type_id: value.type_id().to_string(),
            value: codec::encode(value)?,
        })
    }

    /// Parses the stored path.
    pub fn parsed_path(&self) -> Result<Path, PathError> {
        Path::parse(&self.path)
    }

    /// Decodes the stored value strictly.
    pub fn decode(&self) -> Result<Value, ContainerError> {
        codec::decode(&self.value, &self.type_id)
    }
}

/// Overrides in application order, at most one per path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideList {
    entries: Vec<Override>,
}

impl OverrideList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing any override with the same path.
    ///
    /// The replacement moves to the end so it is applied after everything
    /// recorded before it.
    pub fn set(&mut self, entry: Override) -> Option<Override> {
        let previous = self.remove(&entry.path);
        self.entries.push(entry);
        previous
    }

    pub fn remove(&mut self, path: &str) -> Option<Override> {
        let position = self.entries.iter().position(|entry| entry.path == path)?;
        Some(self.entries.remove(position))
    }

    pub fn get(&self, path: &str) -> Option<&Override> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns true if some override addresses a location inside `path`.
    pub fn has_descendant_of(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| nested_under(&entry.path, path))
    }

    /// Returns true if some override replaces a location that contains `path`.
    pub fn has_ancestor_of(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| nested_under(path, &entry.path))
    }

    /// Returns true if another override overlaps `path` from above or below.
    pub fn overlaps(&self, path: &str) -> bool {
        self.has_ancestor_of(path) || self.has_descendant_of(path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Override> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Override] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_vec(self) -> Vec<Override> {
        self.entries
    }
}

/// Canonical paths only: `inner` continues `outer` with a property or accessor.
fn nested_under(inner: &str, outer: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}

/// Later entries win when paths repeat.
impl FromIterator<Override> for OverrideList {
    fn from_iter<I: IntoIterator<Item = Override>>(iter: I) -> Self {
        let mut list = OverrideList::new();
        for entry in iter {
            list.set(entry);
        }
        list
    }
}

impl<'a> IntoIterator for &'a OverrideList {
    type Item = &'a Override;
    type IntoIter = std::slice::Iter<'a, Override>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
