//! Station locator for synonym resolution and nearest-station lookups
//!
//! Holds the water stations of the tab-separated station reference table.
//! Names are resolved through a case-insensitive synonym index built on first
//! use, and position fixes are matched to the closest station by great-circle
//! distance.

use crate::app::models::StationRecord;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

pub mod geodesy;
pub mod loader;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use geodesy::distance_to_station;
pub use loader::LoadStats;

#[derive(Debug)]
pub struct StationLocator {
    /// Water stations in table order
    pub(crate) stations: Vec<StationRecord>,

    /// Uppercased name or synonym -> canonical name
    pub(crate) synonyms: OnceLock<HashMap<String, String>>,

    /// File the table was read from, if any
    pub(crate) source: Option<PathBuf>,
}

impl StationLocator {
    /// Build a locator over already parsed station rows
    pub fn from_records(stations: Vec<StationRecord>) -> Self {
        Self {
            stations,
            synonyms: OnceLock::new(),
            source: None,
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn source(&self) -> Option<&std::path::Path> {
        self.source.as_deref()
    }
}
