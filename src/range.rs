//! IPv4 range entries and CIDR conversion.

use crate::country::CountryCode;
use anyhow::{anyhow, Result};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// One row of the lookup table: an inclusive IPv4 range and its country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeEntry {
    pub start: u32,
    pub end: u32,
    pub country: CountryCode,
}

impl RangeEntry {
    pub fn new(start: u32, end: u32, country: CountryCode) -> Self {
        Self {
            start,
            end,
            country,
        }
    }

    /// Build an entry covering `network`.
    pub fn from_network(network: Ipv4Net, country: CountryCode) -> Self {
        let (start, end) = network_bounds(network);
        Self::new(start, end, country)
    }

    pub fn contains(&self, ip: u32) -> bool {
        self.start <= ip && ip <= self.end
    }
}

/// Parse an IPv4 network in CIDR notation.
///
/// Host bits are accepted and cleared, so `1.0.1.7/24` yields `1.0.1.0/24`.
/// A bare address without a prefix is treated as a `/32`.
///
/// # Examples
/// ```
/// use geoip_build::range::parse_network;
/// assert_eq!(parse_network("10.1.2.3/8").unwrap().to_string(), "10.0.0.0/8");
/// assert_eq!(parse_network("10.1.2.3").unwrap().to_string(), "10.1.2.3/32");
/// assert!(parse_network("10.0.0.0/33").is_err());
/// ```
pub fn parse_network(network: &str) -> Result<Ipv4Net> {
    if network.contains('/') {
        network
            .parse::<Ipv4Net>()
            .map(|net| net.trunc())
            .map_err(|_| anyhow!("Invalid CIDR: {}", network))
    } else {
        let ip: Ipv4Addr = network
            .parse()
            .map_err(|_| anyhow!("Invalid IPv4 address: {}", network))?;
        Ok(Ipv4Net::from(ip))
    }
}

/// First and last (broadcast) address of a network as integers.
pub fn network_bounds(network: Ipv4Net) -> (u32, u32) {
    (
        u32::from(network.network()),
        u32::from(network.broadcast()),
    )
}

/// Convert a CIDR string into an inclusive `(start, end)` pair.
pub fn cidr_to_range(network: &str) -> Result<(u32, u32)> {
    parse_network(network).map(network_bounds)
}

/// Order entries by range start.
///
/// The sort is stable: entries sharing a start keep their input order, and
/// overlapping or duplicate ranges are left in place.
pub fn sort_entries(entries: &mut [RangeEntry]) {
    entries.sort_by_key(|entry| entry.start);
}
