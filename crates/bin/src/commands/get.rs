//! Get command - prints the value and type at a path.

use templar::codec;

use crate::cli::GetArgs;
use crate::document;
use crate::output::{OutputFormat, print_json};

/// Run the get command
pub fn run(
    args: &GetArgs,
    max_depth: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let container = document::load(&args.document, max_depth)?;
    let value = container.path_lookup(args.path.as_str())?;

    match format {
        OutputFormat::Human => {
            println!("{} ({})", value, value.type_id());
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "path": args.path,
                "type": value.type_id(),
                "value": codec::encode(&value)?,
            }))?;
        }
    }

    Ok(())
}
