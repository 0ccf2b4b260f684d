//! geoip-build - GeoLite2 CSV to compact IPv4 country table
//!
//! Diagnostics go to stderr. Stdout carries only the sorted country list.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use geoip_build::builder::build;
use geoip_build::cli::Cli;
use geoip_build::config::BuildConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BuildConfig::from(cli);
    let report = build(&config)?;
    report.write_country_list(std::io::stdout().lock())?;
    Ok(())
}
