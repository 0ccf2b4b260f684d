//! Build summary: log diagnostics and the country list.
//!
//! Diagnostics go through `tracing` (stderr). The country list is written to
//! the caller's writer, normally stdout, and is consumed by a code generation
//! step, so nothing else may be written there.

use crate::country::CountryCode;
use crate::utils::format_count_with_separator;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub locations: usize,
    pub entries: usize,
    pub skipped: usize,
    pub countries: BTreeSet<CountryCode>,
    pub output: PathBuf,
    pub file_size: u64,
}

impl BuildReport {
    /// Log the processing and output statistics.
    pub fn log_summary(&self) {
        info!("Processed {} entries, skipped {}", self.entries, self.skipped);
        info!("Unique countries: {}", self.countries.len());
        info!(
            "Written {} ({} bytes, {} entries)",
            self.output.display(),
            format_count_with_separator(self.file_size),
            format_count_with_separator(self.entries as u64)
        );
    }

    /// Write the distinct countries, one per line, in alphabetical order.
    pub fn write_country_list<W: Write>(&self, mut out: W) -> io::Result<()> {
        for code in &self.countries {
            writeln!(out, "{}", code)?;
        }
        out.flush()
    }
}
