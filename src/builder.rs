//! The build pipeline: load, join, filter, sort, write.

use crate::blocks::process_blocks;
use crate::config::BuildConfig;
use crate::locations::load_locations;
use crate::range::sort_entries;
use crate::report::BuildReport;
use crate::writer::write_table;
use anyhow::Result;
use tracing::debug;

/// Run a full build and return its statistics.
///
/// Nothing is written to `config.output_path` unless both CSVs were processed
/// without a fatal error and the encoded table passed verification.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let locations = load_locations(&config.locations_path)?;

    let mut scan = process_blocks(&config.blocks_path, &locations)?;
    debug!("Read {} block rows", scan.rows());
    sort_entries(&mut scan.entries);

    let file_size = write_table(&config.output_path, &scan.entries)?;

    let report = BuildReport {
        locations: locations.len(),
        entries: scan.entries.len(),
        skipped: scan.skipped,
        countries: scan.countries,
        output: config.output_path.clone(),
        file_size,
    };
    report.log_summary();
    Ok(report)
}
