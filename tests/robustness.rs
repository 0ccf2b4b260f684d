//! Robustness tests for edge cases and error conditions.
//!
//! These go through the library API with in-memory CSV input.

use geoip_build::blocks::read_blocks;
use geoip_build::error::{BuildError, TableError};
use geoip_build::locations::read_locations;
use geoip_build::range::sort_entries;
use geoip_build::table::{encode_to_vec, GeoTable};
use geoip_build::{CountryCode, INCLUDED_COUNTRIES};
use std::net::Ipv4Addr;

/// Test that a dirty locations file never fails
#[test]
fn test_locations_tolerate_garbage() {
    let csv = "geoname_id,country_iso_code,extra\n\
               ,,\n\
               x,CN\n\
               -1,RU\n\
               99999999999,IR\n\
               12,cn,1,2,3\n\
               13\n\
               14,USA\n";
    let map = read_locations(csv.as_bytes()).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map[&12].as_str(), "CN");
}

/// Test that a blocks file with only a header produces nothing
#[test]
fn test_blocks_header_only() {
    let locations = read_locations("geoname_id,country_iso_code\n1,CN\n".as_bytes()).unwrap();
    let scan = read_blocks(
        "network,geoname_id,registered_country_geoname_id\n".as_bytes(),
        &locations,
    )
    .unwrap();
    assert!(scan.entries.is_empty());
    assert_eq!(scan.skipped, 0);
}

/// Test that a totally empty blocks file is not an error
#[test]
fn test_blocks_empty_input() {
    let locations = read_locations("".as_bytes()).unwrap();
    let scan = read_blocks("".as_bytes(), &locations).unwrap();
    assert_eq!(scan.rows(), 0);
}

/// Test that integer ids outside the id space are skipped as unknown
#[test]
fn test_out_of_range_geoname_ids_are_skipped() {
    let locations = read_locations("geoname_id,country_iso_code\n1,CN\n".as_bytes()).unwrap();
    for id in ["-1", "99999999999"] {
        let csv = format!("network,geoname_id,registered_country_geoname_id\n1.0.0.0/8,{id},\n");
        let scan = read_blocks(csv.as_bytes(), &locations).unwrap();
        assert!(scan.entries.is_empty(), "{id}");
        assert_eq!(scan.skipped, 1, "{id}");
    }
}

/// Test that a non-numeric id next to valid rows still aborts
#[test]
fn test_non_numeric_geoname_id_is_fatal() {
    let locations = read_locations("geoname_id,country_iso_code\n1,CN\n".as_bytes()).unwrap();
    let err = read_blocks(
        "network,geoname_id,registered_country_geoname_id\n1.0.0.0/8,1,\n2.0.0.0/8,1x,\n".as_bytes(),
        &locations,
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidGeonameId { line: 3, .. })
    ));
}

/// Test that an IPv6 network in the IPv4 file is rejected
#[test]
fn test_ipv6_network_is_fatal() {
    let locations = read_locations("geoname_id,country_iso_code\n1,CN\n".as_bytes()).unwrap();
    let err = read_blocks(
        "network,geoname_id,registered_country_geoname_id\n2001:db8::/32,1,\n".as_bytes(),
        &locations,
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidNetwork { .. })
    ));
}

/// Test that only allow-listed countries survive, whatever their frequency
#[test]
fn test_only_allow_listed_countries_survive() {
    let mut locations_csv = String::from("geoname_id,country_iso_code\n");
    let codes = ["US", "CN", "DE", "RU", "JP", "IR", "GB", "CU", "FR", "AE"];
    for (i, code) in codes.iter().enumerate() {
        locations_csv.push_str(&format!("{},{}\n", i + 1, code));
    }
    let locations = read_locations(locations_csv.as_bytes()).unwrap();

    let mut blocks_csv = String::from("network,geoname_id,registered_country_geoname_id\n");
    for n in 0..200u32 {
        let id = (n % codes.len() as u32) + 1;
        blocks_csv.push_str(&format!("{}/24,{},\n", Ipv4Addr::from(n << 8), id));
    }
    let scan = read_blocks(blocks_csv.as_bytes(), &locations).unwrap();

    assert_eq!(scan.rows(), 200);
    assert_eq!(scan.entries.len(), 100);
    assert_eq!(scan.skipped, 100);
    assert!(scan.entries.iter().all(|e| INCLUDED_COUNTRIES.contains(&e.country)));
    let names: Vec<_> = scan.countries.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, ["AE", "CN", "CU", "IR", "RU"]);
}

/// Test that overlapping and reversed input comes out sorted and complete
#[test]
fn test_overlapping_ranges_pass_through() {
    let locations = read_locations("geoname_id,country_iso_code\n1,CN\n2,RU\n".as_bytes()).unwrap();
    let mut scan = read_blocks(
        "network,geoname_id,registered_country_geoname_id\n\
         10.0.0.0/8,1,\n\
         10.1.0.0/16,2,\n\
         9.0.0.0/8,2,\n\
         10.0.0.0/8,1,\n"
            .as_bytes(),
        &locations,
    )
    .unwrap();
    sort_entries(&mut scan.entries);

    assert_eq!(scan.entries.len(), 4);
    let starts: Vec<_> = scan.entries.iter().map(|e| Ipv4Addr::from(e.start)).collect();
    assert_eq!(
        starts,
        [
            Ipv4Addr::new(9, 0, 0, 0),
            Ipv4Addr::new(10, 0, 0, 0),
            Ipv4Addr::new(10, 0, 0, 0),
            Ipv4Addr::new(10, 1, 0, 0),
        ]
    );

    let table = GeoTable::from_bytes(encode_to_vec(&scan.entries).unwrap()).unwrap();
    assert_eq!(table.lookup(Ipv4Addr::new(10, 1, 2, 3)), CountryCode::parse("RU"));
}

/// Test that garbage bytes are rejected by the table reader
#[test]
fn test_table_rejects_garbage() {
    assert_eq!(
        GeoTable::from_bytes(b"not a table".to_vec()).unwrap_err(),
        TableError::BadMagic
    );
    assert!(matches!(
        GeoTable::from_bytes(b"GEO1\xff\xff\xff\xff".to_vec()),
        Err(TableError::Truncated { .. })
    ));
    assert!(matches!(
        GeoTable::from_bytes(Vec::new()),
        Err(TableError::Truncated { .. })
    ));
}
