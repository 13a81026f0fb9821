//! Tests for station name resolution and closest-station lookups

use super::*;
use crate::app::services::station_locator::StationLocator;
use std::thread;

fn fixture_locator() -> StationLocator {
    StationLocator::from_reader(STATION_TABLE.as_bytes(), "inline")
        .unwrap()
        .0
}

#[test]
fn test_proper_station_name() {
    let locator = fixture_locator();

    assert_eq!(locator.proper_station_name("  kattegatt  "), Some("KATTEGATT SY"));
    assert_eq!(
        locator.proper_station_name("landsortsdjupet"),
        Some("BY31 LANDSORTSDJ")
    );
    assert_eq!(
        locator.proper_station_name("by31 landsortsdj"),
        Some("BY31 LANDSORTSDJ")
    );
    assert_eq!(locator.proper_station_name("Anholt Ost"), Some("ANHOLT E"));
}

#[test]
fn test_unresolved_names() {
    let locator = fixture_locator();

    assert_eq!(locator.proper_station_name("HAMNEN"), None);
    assert_eq!(locator.proper_station_name("BROKEN"), None);
    assert_eq!(locator.proper_station_name(""), None);
    assert!(locator.station_info("nowhere").is_none());
    assert!(locator.position("nowhere").is_none());
}

#[test]
fn test_station_info() {
    let locator = fixture_locator();
    let info = locator.station_info("anholt ost").unwrap();

    assert_eq!(info.station, "ANHOLT E");
    assert_eq!(info.lat, 56.6667);
    assert_eq!(info.lon, 12.1167);
    assert_eq!(info.depth, "");
    assert_eq!(info.get("REG_ID"), Some("2"));
    assert_eq!(info.get("station"), Some("ANHOLT E"));
    assert_eq!(info.get("lat"), Some("56.6667"));
    assert_eq!(info.get("depth"), Some(""));
}

#[test]
fn test_position() {
    let locator = fixture_locator();

    assert_eq!(locator.position("BY31"), Some((58.59, 18.235)));
}

#[test]
fn test_station_list_is_sorted() {
    let locator = fixture_locator();

    assert_eq!(
        locator.station_list(),
        vec![
            "ANHOLT E",
            "BY31 LANDSORTSDJ",
            "E EQ",
            "FLADEN",
            "GÅSÖ",
            "KATTEGATT SY",
            "W EQ",
        ]
    );
}

#[test]
fn test_closest_station_without_radius() {
    let locator = fixture_locator();
    let matches = locator.closest_station(Some(57.21), Some(11.52)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].info.station, "KATTEGATT SY");
    assert_eq!(matches[0].distance, 1637);
    assert!(!matches[0].acceptable);
}

#[test]
fn test_closest_station_within_radius() {
    let locator = fixture_locator();
    let matches = locator.closest_station(Some(57.19), Some(11.66)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].info.station, "FLADEN");
    assert_eq!(matches[0].distance, 846);
    assert!(matches[0].acceptable);
}

#[test]
fn test_closest_station_at_identical_position() {
    let locator = fixture_locator();
    let matches = locator.closest_station(Some(58.59), Some(18.235)).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].info.station, "BY31 LANDSORTSDJ");
    assert_eq!(matches[0].distance, 0);
    assert!(matches[0].acceptable);
}

#[test]
fn test_closest_station_returns_all_ties() {
    let locator = fixture_locator();
    let matches = locator.closest_station(Some(0.0), Some(0.0)).unwrap();

    let names: Vec<&str> = matches.iter().map(|m| m.info.station.as_str()).collect();
    assert_eq!(names, vec!["W EQ", "E EQ"]);
    assert!(matches.iter().all(|m| m.distance == 111_055));
    assert!(matches[0].acceptable);
    assert!(!matches[1].acceptable);
}

#[test]
fn test_closest_station_requires_both_coordinates() {
    let locator = fixture_locator();

    assert!(locator.closest_station(None, Some(11.5)).is_none());
    assert!(locator.closest_station(Some(57.2), None).is_none());
    assert!(locator.closest_station(Some(f64::NAN), Some(11.5)).is_none());
}

#[test]
fn test_closest_station_serializes_flat() {
    let locator = fixture_locator();
    let matches = locator.closest_station(Some(57.21), Some(11.52)).unwrap();

    let json = serde_json::to_value(&matches[0]).unwrap();
    assert_eq!(json["station"], "KATTEGATT SY");
    assert_eq!(json["distance"], 1637);
    assert_eq!(json["acceptable"], false);
}

#[test]
fn test_synonym_collision_last_row_wins() {
    let locator = StationLocator::from_records(vec![
        create_test_station("FIRST", 57.0, 11.0, &["SHARED"]),
        create_test_station("SECOND", 58.0, 12.0, &["shared"]),
    ]);

    assert_eq!(locator.proper_station_name("Shared"), Some("SECOND"));
    assert_eq!(locator.proper_station_name("first"), Some("FIRST"));
}

#[test]
fn test_concurrent_name_resolution() {
    let locator = fixture_locator();
    let locator = &locator;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    locator
                        .proper_station_name("kattegatt")
                        .map(str::to_string)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("KATTEGATT SY"));
        }
    });
}
