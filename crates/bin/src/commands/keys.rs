//! Keys command - lists the entries of a container, list or map.

use templar::{Value, constants::CONTAINER_TYPE_ID, path::Segment};

use crate::cli::KeysArgs;
use crate::document;
use crate::output::{OutputFormat, print_json, print_table};

/// Run the keys command
pub fn run(
    args: &KeysArgs,
    max_depth: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let container = document::load(&args.document, max_depth)?;
    let target = match &args.path {
        Some(path) => container.path_lookup(path.as_str())?.into_owned(),
        None => Value::Container(container),
    };

    let entries: Vec<(String, String)> = match &target {
        Value::Container(c) => c
            .iter()
            .map(|(key, value)| (key.clone(), value.type_id().to_string()))
            .collect(),
        Value::List(items) => (0..items.len())
            .map(|i| element(Segment::ListIndex(i)))
            .collect(),
        Value::Map(map) => map
            .keys()
            .map(|key| element(Segment::key(key.as_str())))
            .collect(),
        other => {
            return Err(format!("value of type '{}' has no keys", other.type_id()).into());
        }
    };

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No keys found.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = entries
                .into_iter()
                .map(|(key, type_id)| vec![key, type_id])
                .collect();
            print_table(&["KEY", "TYPE"], &rows)?;
        }
        OutputFormat::Json => {
            let entries: Vec<_> = entries
                .into_iter()
                .map(|(key, type_id)| serde_json::json!({ "key": key, "type": type_id }))
                .collect();
            print_json(&entries)?;
        }
    }

    Ok(())
}

/// List and map elements are always containers.
fn element(accessor: Segment) -> (String, String) {
    (accessor.to_string(), CONTAINER_TYPE_ID.to_string())
}
