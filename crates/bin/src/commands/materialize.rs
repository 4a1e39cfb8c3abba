//! Materialize command - applies an instance record to its template.

use templar::{Instance, codec, instance::InstanceConfig};

use crate::cli::MaterializeArgs;
use crate::document;
use crate::output::{OutputFormat, print_json};

/// Run the materialize command
pub fn run(
    args: &MaterializeArgs,
    config: InstanceConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_depth = config.max_depth;
    let template = document::load_template(&args.template, args.id.as_deref(), max_depth)?;
    let record = document::load_record(&args.record)?
        .ok_or_else(|| format!("{} does not exist", args.record.display()))?;

    let mut instance = Instance::from_record(template, record, config)?;
    let document = codec::encode_document(instance.runtime(), max_depth);
    let skipped: Vec<String> = instance
        .replay_failures()
        .iter()
        .map(ToString::to_string)
        .collect();

    match format {
        OutputFormat::Human => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            for reason in &skipped {
                eprintln!("skipped: {reason}");
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "document": document,
                "skipped": skipped,
            }))?;
        }
    }

    Ok(())
}
