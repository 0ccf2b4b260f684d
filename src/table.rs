//! The `GEO1` binary table: encoding and lookup.
//!
//! ```text
//! offset        size  field
//! 0             4     magic "GEO1"
//! 4             4     entry count (u32 BE)
//! 8 + 10*i      4     start ip   (u32 BE)
//! 12 + 10*i     4     end ip     (u32 BE)
//! 16 + 10*i     2     country    (u16 BE, packed ASCII)
//! ```
//!
//! Entries are sorted by start address so readers can binary search.

use crate::country::CountryCode;
use crate::error::{BuildError, TableError};
use crate::range::RangeEntry;
use anyhow::{Context, Result};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::Path;

pub const MAGIC: &[u8; 4] = b"GEO1";
pub const HEADER_LEN: usize = 8;
pub const ENTRY_LEN: usize = 10;

/// Exact encoded size of a table with `count` entries.
pub const fn encoded_len(count: usize) -> usize {
    HEADER_LEN + ENTRY_LEN * count
}

/// Write `entries` in table layout. The caller is responsible for ordering.
pub fn encode<W: Write>(entries: &[RangeEntry], mut out: W) -> Result<()> {
    let count =
        u32::try_from(entries.len()).map_err(|_| BuildError::TooManyEntries(entries.len()))?;

    out.write_all(MAGIC)?;
    out.write_all(&count.to_be_bytes())?;

    let mut buf = [0u8; ENTRY_LEN];
    for entry in entries {
        buf[0..4].copy_from_slice(&entry.start.to_be_bytes());
        buf[4..8].copy_from_slice(&entry.end.to_be_bytes());
        buf[8..10].copy_from_slice(&entry.country.pack().to_be_bytes());
        out.write_all(&buf)?;
    }
    out.flush()?;
    Ok(())
}

/// Encode into a fresh buffer.
pub fn encode_to_vec(entries: &[RangeEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_len(entries.len()));
    encode(entries, &mut buf)?;
    Ok(buf)
}

/// A parsed table held in memory.
#[derive(Debug, Clone)]
pub struct GeoTable {
    data: Vec<u8>,
    count: usize,
}

impl GeoTable {
    /// Validate the header and wrap the raw bytes.
    ///
    /// Trailing bytes after the last entry are tolerated.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, TableError> {
        if data.len() < HEADER_LEN {
            return Err(TableError::Truncated {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        if data[0..4] != MAGIC[..] {
            return Err(TableError::BadMagic);
        }
        let count = read_u32(&data, 4) as usize;
        // a corrupt count may not fit the address space on 32-bit targets
        let expected = count
            .checked_mul(ENTRY_LEN)
            .and_then(|len| len.checked_add(HEADER_LEN))
            .ok_or(TableError::Truncated {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(TableError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, count })
    }

    /// Read and parse a table file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        Self::from_bytes(data).with_context(|| format!("Invalid table file: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Decode entry `index`. Panics if out of bounds.
    pub fn entry(&self, index: usize) -> RangeEntry {
        let base = HEADER_LEN + index * ENTRY_LEN;
        RangeEntry::new(
            read_u32(&self.data, base),
            read_u32(&self.data, base + 4),
            CountryCode::unpack(u16::from_be_bytes([
                self.data[base + 8],
                self.data[base + 9],
            ])),
        )
    }

    pub fn entries(&self) -> impl Iterator<Item = RangeEntry> + '_ {
        (0..self.count).map(|i| self.entry(i))
    }

    /// Find the country for `ip`.
    ///
    /// Picks the last entry whose start is at or below `ip`, then checks the
    /// end of that entry. Addresses in gaps between ranges resolve to `None`.
    pub fn lookup(&self, ip: Ipv4Addr) -> Option<CountryCode> {
        let ip = u32::from(ip);
        // number of entries with start <= ip
        let (mut lo, mut hi) = (0usize, self.count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if read_u32(&self.data, HEADER_LEN + mid * ENTRY_LEN) <= ip {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let best = lo.checked_sub(1)?;
        let entry = self.entry(best);
        entry.contains(ip).then_some(entry.country)
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
