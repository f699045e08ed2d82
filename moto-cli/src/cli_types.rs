//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "moto-ingest")]
#[command(
    about = "Rebuild the motorcycle catalog JSON from a directory of Excel workbooks",
    long_about = None
)]
pub(crate) struct Cli {
    /// Directory containing the source workbooks (default: data/excel)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving the catalog and per-brand files (default: data/generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file (default: ./moto-ingest.toml, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base name of the output files (<base>.json, <base>-<brand>.json)
    #[arg(long)]
    pub base_name: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}
