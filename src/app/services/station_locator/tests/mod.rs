//! Shared test utilities and fixtures for station locator tests

use crate::app::models::StationRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub mod query_tests;

/// Station table with water, land, broken and tied rows
///
/// - 7 water stations are loadable
/// - `HAMNEN` is a land station and must be filtered out
/// - `BROKEN` has an unparseable latitude and must be skipped
/// - `W EQ` and `E EQ` lie one degree either side of (0, 0)
pub const STATION_TABLE: &str = "\
STATION_NAME\tREG_ID\tLATITUDE_WGS84_SWEREF99_DD\tLONGITUDE_WGS84_SWEREF99_DD\tWADEP\tMEDIA\tSYNONYM_NAMES\tOUT_OF_BOUNDS_RADIUS
BY31 LANDSORTSDJ\t1\t58.59\t18.235\t459\tVatten\tBY31<or>LANDSORTSDJUPET\t1000
ANHOLT E\t2\t56.6667\t12.1167\t\tVatten\tANHOLT<or>ANHOLT OST\t1500
KATTEGATT SY\t3\t57.2\t11.5\t60\tVatten\tKattegatt\t
FLADEN\t4\t57.1833\t11.6667\t70\tVatten, Sediment\t\t1000
HAMNEN\t5\t57.7\t11.9\t\tLand\t\t
BROKEN\t6\tnot-a-number\t11.0\t\tVatten\t\t500
W EQ\t7\t0.0\t1.0\t\tVatten\t\t200000
E EQ\t8\t0.0\t-1.0\t\tVatten\tWEST<or>EQ<or>\t
GÅSÖ\t9\t58.2\t11.3\t20\tVatten\tGASO\t300
";

/// Encode text as Windows-1252 (the fixture only uses Latin-1 characters)
pub fn to_cp1252(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

/// Write the fixture table to `dir` in Windows-1252, as the real table is shipped
pub fn write_station_file(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("station.txt");
    fs::write(&path, to_cp1252(STATION_TABLE))?;
    Ok(path)
}

/// Minimal in-memory station row
pub fn create_test_station(name: &str, lat: f64, lon: f64, synonyms: &[&str]) -> StationRecord {
    StationRecord {
        name: name.to_string(),
        latitude: lat,
        longitude: lon,
        depth: String::new(),
        out_of_bounds_radius: None,
        media: "Vatten".to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        fields: BTreeMap::new(),
    }
}
