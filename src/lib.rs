//! # geoip-build - GeoLite2 CSV to compact IPv4 country table
//!
//! Converts the GeoLite2 country CSV pair into a small sorted binary table
//! used by the network extension to decide which destinations bypass the
//! tunnel. Only countries on a fixed allow-list are kept.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       geoip-build                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── blocks.csv  locations.csv  output.dat (positional)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Locations (csv + serde)                                    │
//! │    └── geoname_id -> country code, lenient                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Blocks (csv + ipnet)                                       │
//! │    ├── location join with registered-country fallback       │
//! │    ├── allow-list filter                                    │
//! │    └── CIDR -> [start, end], strict                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Table (GEO1)                                               │
//! │    ├── sort by start, big-endian encode                     │
//! │    ├── atomic write (tempfile + rename)                     │
//! │    └── reader with binary-search lookup                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Report                                                     │
//! │    ├── statistics via tracing (stderr)                      │
//! │    └── sorted country codes (stdout)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use geoip_build::builder::build;
//! use geoip_build::config::BuildConfig;
//! use geoip_build::table::GeoTable;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = BuildConfig::default();
//!     let report = build(&config)?;
//!     report.write_country_list(std::io::stdout().lock())?;
//!
//!     let table = GeoTable::open(&config.output_path)?;
//!     println!("{:?}", table.lookup("1.0.1.1".parse()?));
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`blocks`] - Block CSV processing and allow-list filter
//! - [`builder`] - End-to-end build pipeline
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Input/output paths and defaults
//! - [`country`] - Country codes, packing and the allow-list
//! - [`error`] - Fatal error types
//! - [`locations`] - Location CSV loading
//! - [`range`] - IPv4 ranges, CIDR conversion and sorting
//! - [`report`] - Build statistics and country list output
//! - [`table`] - `GEO1` encoding and lookup
//! - [`utils`] - Formatting helpers
//! - [`writer`] - Atomic table output

pub mod blocks;
pub mod builder;
pub mod cli;
pub mod config;
pub mod country;
pub mod error;
pub mod locations;
pub mod range;
pub mod report;
pub mod table;
pub mod utils;
pub mod writer;

pub use cli::Cli;
pub use config::BuildConfig;
pub use country::{CountryCode, INCLUDED_COUNTRIES};
pub use range::RangeEntry;
pub use table::GeoTable;

/// CSV reader shared by both inputs: header-addressed, ragged rows allowed,
/// fields trimmed.
pub(crate) fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}
