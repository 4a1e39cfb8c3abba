//! Loading and saving wire-format documents.

use std::{fs, io, path::Path};

use templar::{
    Container,
    codec::{self, WireDocument},
    instance::{InstanceRecord, Template, TemplateHandle},
};

/// Read a wire-format document from disk.
///
/// Unlike [`Container::from_wire_str`], malformed JSON is reported rather
/// than treated as an empty document.
pub fn load(path: &Path, max_depth: usize) -> Result<Container, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Container::new());
    }
    let document: WireDocument = serde_json::from_str(&text)
        .map_err(|e| format!("{} is not a wire-format document: {e}", path.display()))?;
    let container = codec::decode_document(&document, max_depth);
    tracing::debug!(path = %path.display(), keys = container.len(), "Loaded document");
    Ok(container)
}

/// Write `container` to disk as pretty-printed wire-format JSON.
pub fn save(
    path: &Path,
    container: &Container,
    max_depth: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = codec::encode_document(container, max_depth);
    fs::write(path, serde_json::to_string_pretty(&document)?)?;
    tracing::info!(path = %path.display(), "Saved document");
    Ok(())
}

/// Load a document as a template, named by `id` or by the file stem.
pub fn load_template(
    path: &Path,
    id: Option<&str>,
    max_depth: usize,
) -> Result<TemplateHandle, Box<dyn std::error::Error>> {
    let container = load(path, max_depth)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| format!("cannot derive a template id from {}", path.display()))?,
    };
    Ok(Template::new(id, container).into_handle())
}

/// Read an instance record, or `None` if the file does not exist yet.
pub fn load_record(path: &Path) -> Result<Option<InstanceRecord>, Box<dyn std::error::Error>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let record = serde_json::from_str(&text)
        .map_err(|e| format!("{} is not an instance record: {e}", path.display()))?;
    Ok(Some(record))
}

/// Write an instance record as pretty-printed JSON.
pub fn save_record(path: &Path, record: &InstanceRecord) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, serde_json::to_string_pretty(record)?)?;
    tracing::info!(
        path = %path.display(),
        overrides = record.overrides.len(),
        "Saved instance record"
    );
    Ok(())
}
