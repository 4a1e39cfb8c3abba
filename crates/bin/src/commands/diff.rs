//! Diff command - seeds an instance from a working copy and prints its record.

use templar::Instance;

use crate::cli::DiffArgs;
use crate::document;
use crate::output::{OutputFormat, print_json, print_table};

/// Run the diff command
pub fn run(
    args: &DiffArgs,
    config: templar::instance::InstanceConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_depth = config.max_depth;
    let template = document::load_template(&args.template, args.id.as_deref(), max_depth)?;
    let working = document::load(&args.working, max_depth)?;

    let instance = Instance::from_working_copy(template, &working, config);
    let record = instance.to_record();
    tracing::info!(
        template = %record.template,
        overrides = record.overrides.len(),
        "Diffed working copy"
    );

    match format {
        OutputFormat::Human => {
            if record.overrides.is_empty() {
                println!("No differences from template '{}'.", record.template);
                return Ok(());
            }
            let rows: Vec<Vec<String>> = record
                .overrides
                .iter()
                .map(|entry| {
                    vec![
                        entry.path.clone(),
                        entry.type_id.clone(),
                        entry.value.clone(),
                    ]
                })
                .collect();
            print_table(&["PATH", "TYPE", "VALUE"], &rows)?;
        }
        OutputFormat::Json => print_json(&record)?,
    }

    Ok(())
}
