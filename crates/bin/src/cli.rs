//! CLI argument definitions for the templar binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use templar::{
    constants::DEFAULT_MAX_DEPTH,
    instance::{CollectionDiff, InstanceConfig, WriteMode},
};

use crate::output::OutputFormat;

/// Output format flag
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Aligned tables and plain text
    Human,
    /// One JSON document per command
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Default write mode for instance writes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Persistent,
    Ephemeral,
}

/// How collections are compared when diffing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollectionDiffArg {
    /// Recurse into lists and maps of matching shape
    Structural,
    /// Always record collections whole
    Reference,
}

/// Inspect and edit templar wire-format documents
#[derive(Parser, Debug)]
#[command(name = "templar")]
#[command(about = "Path-addressable template data with override-only instances")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", env = "TEMPLAR_FORMAT")]
    pub format: FormatArg,

    /// Write mode for instances
    #[arg(long, global = true, default_value = "persistent", env = "TEMPLAR_MODE")]
    pub mode: ModeArg,

    /// Collection comparison used when diffing
    #[arg(
        long,
        global = true,
        default_value = "structural",
        env = "TEMPLAR_COLLECTION_DIFF"
    )]
    pub collection_diff: CollectionDiffArg,

    /// Recursion bound for copying, encoding and diffing
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH, env = "TEMPLAR_MAX_DEPTH")]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Instance configuration assembled from the global flags.
    pub fn instance_config(&self) -> InstanceConfig {
        let write_mode = match self.mode {
            ModeArg::Persistent => WriteMode::Persistent,
            ModeArg::Ephemeral => WriteMode::Ephemeral,
        };
        let collection_diff = match self.collection_diff {
            CollectionDiffArg::Structural => CollectionDiff::Structural,
            CollectionDiffArg::Reference => CollectionDiff::Reference,
        };
        InstanceConfig::default()
            .with_write_mode(write_mode)
            .with_collection_diff(collection_diff)
            .with_max_depth(self.max_depth)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value and type at a path
    Get(GetArgs),
    /// List the keys of a container
    Keys(KeysArgs),
    /// Write a value at a path
    Set(SetArgs),
    /// Print the instance record that reproduces a working copy
    Diff(DiffArgs),
    /// Apply an instance record to its template
    Materialize(MaterializeArgs),
    /// Write a value through an instance and update its record
    Edit(EditArgs),
}

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Wire-format document
    pub document: PathBuf,

    /// Path to read, e.g. `stats.hp` or `items[0].name`
    pub path: String,
}

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Wire-format document
    pub document: PathBuf,

    /// Container to list; the document root when omitted
    pub path: Option<String>,
}

/// Arguments for the set command
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Wire-format document
    pub document: PathBuf,

    /// Path to write
    pub path: String,

    /// Type identifier of the payload, e.g. `int` or `vec3`
    pub type_id: String,

    /// Encoded payload, e.g. `42` or `[1.0,2.0,3.0]`
    pub payload: String,

    /// Where to write the result; overwrites the input when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the diff command
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Template document
    pub template: PathBuf,

    /// Modified copy of the template
    pub working: PathBuf,

    /// Template identifier stored in the record; defaults to the file stem
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for the materialize command
#[derive(Args, Debug)]
pub struct MaterializeArgs {
    /// Template document
    pub template: PathBuf,

    /// Instance record produced by `diff`
    pub record: PathBuf,

    /// Template identifier; defaults to the file stem
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Template document
    pub template: PathBuf,

    /// Instance record to update; created when missing
    pub record: PathBuf,

    /// Path to write
    pub path: String,

    /// Type identifier of the payload
    pub type_id: String,

    /// Encoded payload
    pub payload: String,

    /// Where to write the record; overwrites the input when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template identifier; defaults to the file stem
    #[arg(long)]
    pub id: Option<String>,
}
