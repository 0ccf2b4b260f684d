//! CLI argument parsing with clap.

use crate::config::{BuildConfig, DEFAULT_BLOCKS_CSV, DEFAULT_LOCATIONS_CSV, DEFAULT_OUTPUT};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "geoip-build")]
#[command(
    author,
    version,
    about = "Convert GeoLite2 CSV data into a compact IPv4-to-country table"
)]
pub struct Cli {
    /// GeoLite2 IPv4 blocks CSV
    #[arg(default_value = DEFAULT_BLOCKS_CSV)]
    pub blocks: PathBuf,

    /// GeoLite2 locations CSV
    #[arg(default_value = DEFAULT_LOCATIONS_CSV)]
    pub locations: PathBuf,

    /// Output path for the binary table
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug output, including skipped rows)
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Cli> for BuildConfig {
    fn from(cli: Cli) -> Self {
        Self {
            blocks_path: cli.blocks,
            locations_path: cli.locations,
            output_path: cli.output,
        }
    }
}
