//! Block processor: network blocks joined to countries.
//!
//! Unlike the location loader, this side is strict about what it does read:
//! a non-numeric geoname id or an unparseable network aborts the build.
//! Rows that are merely incomplete, unknown or filtered out are counted as
//! skipped.

use crate::country::CountryCode;
use crate::error::BuildError;
use crate::locations::LocationMap;
use crate::range::{parse_network, RangeEntry};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::num::{IntErrorKind, ParseIntError};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct BlockRow {
    #[serde(default)]
    network: String,
    #[serde(default)]
    geoname_id: String,
    #[serde(default)]
    registered_country_geoname_id: String,
}

impl BlockRow {
    /// Location id, falling back to the registered country.
    fn location_id(&self) -> &str {
        if self.geoname_id.is_empty() {
            &self.registered_country_geoname_id
        } else {
            &self.geoname_id
        }
    }
}

/// Result of one pass over the blocks CSV.
#[derive(Debug, Default)]
pub struct BlockScan {
    /// Included ranges in CSV row order.
    pub entries: Vec<RangeEntry>,
    /// Rows dropped as incomplete, unknown or not on the allow-list.
    pub skipped: usize,
    /// Distinct countries present in `entries`, alphabetically ordered.
    pub countries: BTreeSet<CountryCode>,
}

impl BlockScan {
    /// Total data rows seen.
    pub fn rows(&self) -> usize {
        self.entries.len() + self.skipped
    }
}

/// Parse a geoname id from the blocks CSV.
///
/// Anything that is not a base-10 integer is an error. Integers outside the
/// `u32` id space (negative or too large) parse to `None`: they cannot match
/// a location and are skipped like any other unknown id.
fn parse_geoname_id(value: &str) -> Result<Option<u32>, ParseIntError> {
    match value.parse::<i64>() {
        Ok(id) => Ok(u32::try_from(id).ok()),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Read the blocks CSV and keep the ranges whose country is allow-listed.
pub fn process_blocks(path: &Path, locations: &LocationMap) -> Result<BlockScan> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open blocks CSV: {:?}", path))?;
    read_blocks(file, locations).with_context(|| format!("Failed to process blocks CSV: {:?}", path))
}

/// Reader-based variant of [`process_blocks`].
pub fn read_blocks<R: std::io::Read>(reader: R, locations: &LocationMap) -> Result<BlockScan> {
    let mut rdr = crate::csv_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut scan = BlockScan::default();
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: BlockRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                debug!("Line {}: unreadable row: {}", line, e);
                scan.skipped += 1;
                continue;
            }
        };

        let id_str = row.location_id();
        if row.network.is_empty() || id_str.is_empty() {
            debug!("Line {}: missing network or geoname id", line);
            scan.skipped += 1;
            continue;
        }

        let id = parse_geoname_id(id_str).map_err(|_| BuildError::InvalidGeonameId {
            line,
            value: id_str.to_string(),
        })?;

        let country = match id.and_then(|id| locations.get(&id)) {
            Some(country) if country.is_included() => *country,
            Some(country) => {
                debug!("Line {}: {} not included", line, country);
                scan.skipped += 1;
                continue;
            }
            None => {
                debug!("Line {}: unknown geoname id {}", line, id_str);
                scan.skipped += 1;
                continue;
            }
        };

        let network = parse_network(&row.network).map_err(|_| BuildError::InvalidNetwork {
            line,
            value: row.network.clone(),
        })?;

        scan.entries.push(RangeEntry::from_network(network, country));
        scan.countries.insert(country);
    }

    Ok(scan)
}
