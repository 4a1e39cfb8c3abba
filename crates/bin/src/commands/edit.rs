//! Edit command - writes through an instance of a template and saves its record.

use std::path::PathBuf;

use templar::{
    Instance, Value, codec,
    instance::{InstanceConfig, WriteMode},
};

use crate::cli::EditArgs;
use crate::document;
use crate::output::{OutputFormat, print_json};

/// What an edit did to the instance.
#[derive(Debug)]
pub struct EditOutcome {
    pub mode: WriteMode,
    /// Effective value at the path after the write
    pub value: Option<Value>,
    /// Value the path held before its first ephemeral write
    pub original: Option<Value>,
    pub overrides: usize,
    /// Where the record was written; ephemeral edits leave it alone
    pub saved: Option<PathBuf>,
}

/// Apply the write and persist the record when the write mode calls for it.
pub fn apply(
    args: &EditArgs,
    config: InstanceConfig,
) -> Result<EditOutcome, Box<dyn std::error::Error>> {
    let max_depth = config.max_depth;
    let mode = config.write_mode;
    let template = document::load_template(&args.template, args.id.as_deref(), max_depth)?;
    let mut instance = match document::load_record(&args.record)? {
        Some(record) => Instance::from_record(template, record, config)?,
        None => {
            tracing::debug!(record = %args.record.display(), "No record yet; starting empty");
            Instance::new(template, config)
        }
    };

    let value = codec::decode(&args.payload, &args.type_id)?;
    instance.set(args.path.as_str(), value)?;

    let saved = match mode {
        WriteMode::Persistent => {
            let destination = args.output.clone().unwrap_or_else(|| args.record.clone());
            document::save_record(&destination, &instance.to_record())?;
            Some(destination)
        }
        WriteMode::Ephemeral => None,
    };

    Ok(EditOutcome {
        mode,
        value: instance.value(args.path.as_str()),
        original: instance.original_value(args.path.as_str()).cloned(),
        overrides: instance.overrides().len(),
        saved,
    })
}

/// Run the edit command
pub fn run(
    args: &EditArgs,
    config: InstanceConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = apply(args, config)?;
    let value = outcome.value.as_ref().map(ToString::to_string);
    let original = outcome.original.as_ref().map(ToString::to_string);

    match format {
        OutputFormat::Human => match &outcome.saved {
            Some(destination) => println!(
                "{}: {} ({} overrides in {})",
                args.path,
                value.as_deref().unwrap_or("null"),
                outcome.overrides,
                destination.display()
            ),
            None => println!(
                "{}: {} -> {} (ephemeral; record unchanged)",
                args.path,
                original.as_deref().unwrap_or("null"),
                value.as_deref().unwrap_or("null")
            ),
        },
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "path": args.path,
                "mode": outcome.mode,
                "value": value,
                "original": original,
                "overrides": outcome.overrides,
                "record": outcome.saved.map(|p| p.display().to_string()),
            }))?;
        }
    }

    Ok(())
}
