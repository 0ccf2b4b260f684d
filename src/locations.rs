//! Location loader: `geoname_id` -> country code.
//!
//! This side of the join is lenient. Any row that cannot yield an id and a
//! two-letter code is dropped without error.

use crate::country::CountryCode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Location id to country mapping.
pub type LocationMap = HashMap<u32, CountryCode>;

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(default)]
    geoname_id: String,
    #[serde(default)]
    country_iso_code: String,
}

impl LocationRow {
    fn into_entry(self) -> Option<(u32, CountryCode)> {
        if self.geoname_id.is_empty() || self.country_iso_code.is_empty() {
            return None;
        }
        let id = self.geoname_id.parse().ok()?;
        let code = CountryCode::parse(&self.country_iso_code)?;
        Some((id, code))
    }
}

/// Load the locations CSV into a [`LocationMap`].
///
/// Only I/O failures are errors. Rows with missing fields, a non-numeric id
/// or a code that is not exactly two ASCII characters are skipped.
pub fn load_locations(path: &Path) -> Result<LocationMap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open locations CSV: {:?}", path))?;
    let mapping = read_locations(file)
        .with_context(|| format!("Failed to read locations CSV: {:?}", path))?;
    info!("Loaded {} country locations", mapping.len());
    Ok(mapping)
}

/// Reader-based variant of [`load_locations`].
pub fn read_locations<R: std::io::Read>(reader: R) -> Result<LocationMap> {
    let mut rdr = crate::csv_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut mapping = LocationMap::new();
    let mut skipped = 0usize;
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        let entry = record
            .deserialize::<LocationRow>(Some(&headers))
            .ok()
            .and_then(LocationRow::into_entry);
        match entry {
            Some((id, code)) => {
                mapping.insert(id, code);
            }
            None => skipped += 1,
        }
    }

    debug!("Skipped {} location rows without a usable country", skipped);
    Ok(mapping)
}
