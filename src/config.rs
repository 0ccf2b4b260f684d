//! Build configuration: input and output locations.

use std::path::PathBuf;

pub const DEFAULT_BLOCKS_CSV: &str = "GeoLite2-Country-Blocks-IPv4.csv";
pub const DEFAULT_LOCATIONS_CSV: &str = "GeoLite2-Country-Locations-en.csv";
pub const DEFAULT_OUTPUT: &str = "Anywhere Network Extension/geoip.dat";

/// Paths for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Network blocks CSV (`network`, `geoname_id`, `registered_country_geoname_id`)
    pub blocks_path: PathBuf,
    /// Locations CSV (`geoname_id`, `country_iso_code`)
    pub locations_path: PathBuf,
    /// Destination of the binary table
    pub output_path: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            blocks_path: PathBuf::from(DEFAULT_BLOCKS_CSV),
            locations_path: PathBuf::from(DEFAULT_LOCATIONS_CSV),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.blocks_path, PathBuf::from("GeoLite2-Country-Blocks-IPv4.csv"));
        assert_eq!(config.locations_path, PathBuf::from("GeoLite2-Country-Locations-en.csv"));
        assert_eq!(config.output_path, PathBuf::from("Anywhere Network Extension/geoip.dat"));
    }
}
