//! Station name resolution and nearest-station queries

use super::StationLocator;
use super::geodesy::distance_to_station;
use crate::app::models::{StationInfo, StationMatch, StationRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

impl StationLocator {
    fn synonym_index(&self) -> &HashMap<String, String> {
        self.synonyms
            .get_or_init(|| build_synonym_index(&self.stations))
    }

    /// Canonical name for a station name or synonym
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn proper_station_name(&self, synonym: &str) -> Option<&str> {
        let key = synonym.trim().to_uppercase();
        self.synonym_index().get(&key).map(String::as_str)
    }

    fn record(&self, name: &str) -> Option<&StationRecord> {
        let proper = self.proper_station_name(name)?;
        self.stations.iter().find(|station| station.name == proper)
    }

    /// Full table row for a station, with `lat`, `lon`, `depth` and `station` merged in
    pub fn station_info(&self, name: &str) -> Option<StationInfo> {
        self.record(name).map(StationInfo::from_record)
    }

    /// `(latitude, longitude)` of a station
    pub fn position(&self, name: &str) -> Option<(f64, f64)> {
        self.record(name).map(StationRecord::position)
    }

    /// Canonical station names, sorted and without duplicates
    pub fn station_list(&self) -> Vec<&str> {
        self.stations
            .iter()
            .map(|station| station.name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every station at the minimum distance from a position fix
    ///
    /// Returns `None` when either coordinate is missing or not finite, or when
    /// the table is empty. Ties keep table order.
    pub fn closest_station(&self, lat: Option<f64>, lon: Option<f64>) -> Option<Vec<StationMatch>> {
        let lat = lat.filter(|v| v.is_finite())?;
        let lon = lon.filter(|v| v.is_finite())?;

        let distances: Vec<u64> = self
            .stations
            .iter()
            .map(|station| distance_to_station((lat, lon), station.position()))
            .collect();
        let min_distance = distances.iter().copied().min()?;

        let matches: Vec<StationMatch> = self
            .stations
            .iter()
            .zip(distances)
            .filter(|(_, distance)| *distance == min_distance)
            .map(|(station, distance)| StationMatch {
                info: StationInfo::from_record(station),
                distance,
                acceptable: station
                    .out_of_bounds_radius
                    .is_some_and(|radius| distance as f64 <= radius),
            })
            .collect();

        debug!(
            "Closest station to ({}, {}): {} at {} m",
            lat,
            lon,
            matches
                .iter()
                .map(|m| m.info.station.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            min_distance
        );

        Some(matches)
    }
}

/// Uppercased names and synonyms mapped to canonical names; later rows win
fn build_synonym_index(stations: &[StationRecord]) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for station in stations {
        let names = std::iter::once(station.name.as_str())
            .chain(station.synonyms.iter().map(String::as_str));
        for alias in names {
            let key = alias.to_uppercase();
            if let Some(previous) = index.insert(key, station.name.clone()) {
                if previous != station.name {
                    debug!(
                        "Synonym '{}' moved from '{}' to '{}'",
                        alias, previous, station.name
                    );
                }
            }
        }
    }
    index
}
