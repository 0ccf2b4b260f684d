//! Two-letter country codes and the fixed allow-list.
//!
//! A [`CountryCode`] is stored as its two ASCII bytes and persisted as a
//! big-endian `u16`: `(first << 8) | second`, so `"CN"` packs to `0x434E`.

use std::fmt;

/// Countries whose ranges are kept in the lookup table.
///
/// Users in these countries route domestic traffic around the tunnel;
/// every other country is dropped from the table.
pub const INCLUDED_COUNTRIES: [CountryCode; 10] = [
    CountryCode::from_bytes(*b"CN"),
    CountryCode::from_bytes(*b"RU"),
    CountryCode::from_bytes(*b"IR"),
    CountryCode::from_bytes(*b"TM"),
    CountryCode::from_bytes(*b"MM"),
    CountryCode::from_bytes(*b"BY"),
    CountryCode::from_bytes(*b"SA"),
    CountryCode::from_bytes(*b"AE"),
    CountryCode::from_bytes(*b"VN"),
    CountryCode::from_bytes(*b"CU"),
];

/// An uppercase two-character ASCII country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Build a code from raw bytes. Callers are expected to pass uppercase ASCII.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// Parse a code as it appears in the locations CSV.
    ///
    /// Returns `None` unless the input is exactly two ASCII characters.
    /// The result is uppercased.
    ///
    /// # Examples
    /// ```
    /// use geoip_build::country::CountryCode;
    /// assert_eq!(CountryCode::parse("cn").unwrap().as_str(), "CN");
    /// assert!(CountryCode::parse("CHN").is_none());
    /// assert!(CountryCode::parse("").is_none());
    /// ```
    pub fn parse(code: &str) -> Option<Self> {
        match code.as_bytes() {
            [a, b] if a.is_ascii() && b.is_ascii() => {
                Some(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => None,
        }
    }

    /// Pack into the on-disk `u16` representation.
    pub const fn pack(self) -> u16 {
        ((self.0[0] as u16) << 8) | self.0[1] as u16
    }

    /// Inverse of [`CountryCode::pack`].
    pub const fn unpack(packed: u16) -> Self {
        Self([(packed >> 8) as u8, packed as u8])
    }

    pub fn as_str(&self) -> &str {
        // non-ASCII bytes can only come from unpacking a corrupt table
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    /// Whether this country is on the allow-list.
    pub fn is_included(self) -> bool {
        INCLUDED_COUNTRIES.contains(&self)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Packing then unpacking returns the original code
        #[test]
        fn prop_pack_roundtrip(code in "[A-Z]{2}") {
            let parsed = CountryCode::parse(&code).unwrap();
            let unpacked = CountryCode::unpack(parsed.pack());
            prop_assert_eq!(unpacked.as_str(), code.as_str());
        }

        /// High byte is the first letter, low byte the second
        #[test]
        fn prop_pack_byte_order(code in "[A-Z]{2}") {
            let packed = CountryCode::parse(&code).unwrap().pack();
            let bytes = code.as_bytes();
            prop_assert_eq!((packed >> 8) as u8, bytes[0]);
            prop_assert_eq!((packed & 0xFF) as u8, bytes[1]);
        }
    }
}
