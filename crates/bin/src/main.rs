use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod document;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("templar=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let format = OutputFormat::from(cli.format);
    let config = cli.instance_config();

    match &cli.command {
        Commands::Get(args) => commands::get::run(args, cli.max_depth, format),
        Commands::Keys(args) => commands::keys::run(args, cli.max_depth, format),
        Commands::Set(args) => commands::set::run(args, cli.max_depth, format),
        Commands::Diff(args) => commands::diff::run(args, config, format),
        Commands::Materialize(args) => commands::materialize::run(args, config, format),
        Commands::Edit(args) => commands::edit::run(args, config, format),
    }
}
