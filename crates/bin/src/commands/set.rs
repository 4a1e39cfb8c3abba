//! Set command - decodes a payload and writes it at a path.

use templar::codec;

use crate::cli::SetArgs;
use crate::document;
use crate::output::{OutputFormat, print_json};

/// Run the set command
pub fn run(
    args: &SetArgs,
    max_depth: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut container = document::load(&args.document, max_depth)?;
    let value = codec::decode(&args.payload, &args.type_id)?;
    let previous = container.path_set(args.path.as_str(), value)?;

    let destination = args.output.as_deref().unwrap_or(&args.document);
    document::save(destination, &container, max_depth)?;

    match format {
        OutputFormat::Human => match &previous {
            Some(old) => println!("{}: {} -> {}", args.path, old, args.payload),
            None => println!("{}: {}", args.path, args.payload),
        },
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "path": args.path,
                "type": args.type_id,
                "replaced": previous.is_some(),
                "output": destination.display().to_string(),
            }))?;
        }
    }

    Ok(())
}
