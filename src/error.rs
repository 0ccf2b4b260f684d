//! Error types for geoip-build.

use thiserror::Error;

/// Fatal conditions that abort a build.
///
/// Dirty-but-expected input (unknown locations, filtered countries, short rows)
/// never produces one of these; it is skipped and counted instead.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid geoname id {value:?} on line {line}")]
    InvalidGeonameId { line: u64, value: String },

    #[error("Invalid IPv4 network {value:?} on line {line}")]
    InvalidNetwork { line: u64, value: String },

    #[error("Too many entries to encode: {0}")]
    TooManyEntries(usize),

    #[error("Output verification failed: {0}")]
    Verification(String),
}

/// Errors raised while parsing a `GEO1` table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Bad magic: expected \"GEO1\"")]
    BadMagic,

    #[error("Truncated table: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}
