//! Data models for the CTD pre-system
//!
//! This module contains the core data structures shared by the series registry
//! and the station locator: the closed set of filename fields a series can be
//! queried by, the criteria built from them, and station reference rows.

use crate::constants::{station_info_keys, SERNO_WIDTH};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Series Fields and Criteria
// =============================================================================

/// A semantic field extracted from a cast filename stem
///
/// Not every filename format supports every field; extraction of an
/// unsupported field yields `None` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesField {
    /// Instrument type, e.g. `SBE09`
    Instrument,

    /// Four digit instrument serial, e.g. `1387`
    InstrumentSerial,

    /// Cast date as `YYYYMMDD`
    Date,

    /// Cast time as `HHMM`
    Time,

    /// First four digits of the date
    Year,

    /// Two digit country code, e.g. `77`
    Country,

    /// Ship identifier (`77SE` in the current format, `3401` in the legacy one)
    Ship,

    /// Two digit cruise number
    Cruise,

    /// Four digit series number
    Serno,
}

impl SeriesField {
    /// Every field, in stem order
    pub const ALL: [SeriesField; 9] = [
        SeriesField::Instrument,
        SeriesField::InstrumentSerial,
        SeriesField::Date,
        SeriesField::Time,
        SeriesField::Year,
        SeriesField::Country,
        SeriesField::Ship,
        SeriesField::Cruise,
        SeriesField::Serno,
    ];

    /// Canonical key name used in criteria strings
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesField::Instrument => "instrument",
            SeriesField::InstrumentSerial => "instrument_serial",
            SeriesField::Date => "date",
            SeriesField::Time => "time",
            SeriesField::Year => "year",
            SeriesField::Country => "country",
            SeriesField::Ship => "ship",
            SeriesField::Cruise => "cruise",
            SeriesField::Serno => "serno",
        }
    }

    fn expected_keys() -> String {
        Self::ALL
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "instrument" => Ok(SeriesField::Instrument),
            "instrument_serial" => Ok(SeriesField::InstrumentSerial),
            "date" => Ok(SeriesField::Date),
            "time" => Ok(SeriesField::Time),
            "year" => Ok(SeriesField::Year),
            "country" | "ctry" => Ok(SeriesField::Country),
            "ship" => Ok(SeriesField::Ship),
            "cruise" => Ok(SeriesField::Cruise),
            "serno" | "serial_number" => Ok(SeriesField::Serno),
            _ => Err(Error::invalid_criterion(s, SeriesField::expected_keys())),
        }
    }
}

/// Partial identifying fields used to select series from the registry
///
/// Keys are restricted to [`SeriesField`], so a misspelled criterion is
/// rejected when the criteria are built rather than silently matching
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesCriteria {
    values: BTreeMap<SeriesField, String>,
}

impl SeriesCriteria {
    /// Create empty criteria (matches every indexed file)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a criterion
    pub fn with(mut self, field: SeriesField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn instrument(self, value: impl Into<String>) -> Self {
        self.with(SeriesField::Instrument, value)
    }

    pub fn ship(self, value: impl Into<String>) -> Self {
        self.with(SeriesField::Ship, value)
    }

    pub fn cruise(self, value: impl Into<String>) -> Self {
        self.with(SeriesField::Cruise, value)
    }

    pub fn year(self, value: impl Into<String>) -> Self {
        self.with(SeriesField::Year, value)
    }

    pub fn serno(self, value: impl Into<String>) -> Self {
        self.with(SeriesField::Serno, value)
    }

    /// Add or replace a criterion in place
    pub fn insert(&mut self, field: SeriesField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Get the value supplied for a field
    pub fn get(&self, field: SeriesField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Copy of these criteria with one field removed
    pub fn without(&self, field: SeriesField) -> Self {
        let mut values = self.values.clone();
        values.remove(&field);
        Self { values }
    }

    /// Iterate over the supplied criteria in field order
    pub fn iter(&self) -> impl Iterator<Item = (SeriesField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parse criteria from `key=value` pairs
    ///
    /// Keys are parsed with [`SeriesField::from_str`]; values are trimmed.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criteria = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                Error::data_validation(format!(
                    "Invalid criterion '{}': expected key=value",
                    pair
                ))
            })?;
            let field: SeriesField = key.parse()?;
            criteria.insert(field, value.trim());
        }
        Ok(criteria)
    }

    /// Ensure every listed field has a non-empty value
    ///
    /// # Errors
    /// Returns `Error::MissingFields` naming every absent field, not just the first.
    pub fn require(&self, fields: &[SeriesField]) -> Result<()> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|field| self.get(**field).is_none_or(|value| value.trim().is_empty()))
            .map(|field| field.as_str())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::missing_fields(missing))
        }
    }
}

impl FromStr for SeriesCriteria {
    type Err = Error;

    /// Parse comma-separated `key=value` pairs, e.g. `instrument=SBE09,ship=77SE`
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_pairs(s.split(',').map(str::trim).filter(|pair| !pair.is_empty()))
    }
}

/// Format a series number as a zero-padded four digit string
pub fn format_serno(serno: u32) -> String {
    format!("{:0width$}", serno, width = SERNO_WIDTH)
}

// =============================================================================
// Station Reference Rows
// =============================================================================

/// One eligible (water) row of the station reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Canonical station name
    pub name: String,

    /// Latitude in WGS84 decimal degrees
    pub latitude: f64,

    /// Longitude in WGS84 decimal degrees
    pub longitude: f64,

    /// Water depth as written in the table (empty when missing)
    pub depth: String,

    /// Acceptable distance in meters for a position fix to count as "at" the station
    pub out_of_bounds_radius: Option<f64>,

    /// Media classifier (empty when missing)
    pub media: String,

    /// Alternative names, in table order
    pub synonyms: Vec<String>,

    /// Every column of the source row, keyed by header name
    pub fields: BTreeMap<String, String>,
}

impl StationRecord {
    /// Validate coordinate ranges
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {} for station '{}': must be between -90 and 90 degrees",
                self.latitude, self.name
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {} for station '{}': must be between -180 and 180 degrees",
                self.longitude, self.name
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Error::data_validation(
                "Station name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Station position as (latitude, longitude)
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A station row with the convenience keys `lat`, `lon`, `depth` and `station` merged in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub station: String,
    pub lat: f64,
    pub lon: f64,
    pub depth: String,
    pub out_of_bounds_radius: Option<f64>,
    /// Source row plus the merged convenience keys
    pub fields: BTreeMap<String, String>,
}

impl StationInfo {
    pub fn from_record(record: &StationRecord) -> Self {
        let mut fields = record.fields.clone();
        fields.insert(station_info_keys::LAT.to_string(), record.latitude.to_string());
        fields.insert(station_info_keys::LON.to_string(), record.longitude.to_string());
        fields.insert(station_info_keys::DEPTH.to_string(), record.depth.clone());
        fields.insert(station_info_keys::STATION.to_string(), record.name.clone());

        Self {
            station: record.name.clone(),
            lat: record.latitude,
            lon: record.longitude,
            depth: record.depth.clone(),
            out_of_bounds_radius: record.out_of_bounds_radius,
            fields,
        }
    }

    /// Look up any column of the merged row
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// A closest-station hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMatch {
    #[serde(flatten)]
    pub info: StationInfo,

    /// Great-circle distance from the query point, in whole meters
    pub distance: u64,

    /// Whether `distance` lies within the station's out-of-bounds radius
    pub acceptable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_field_parsing() {
        assert_eq!("instrument".parse::<SeriesField>().unwrap(), SeriesField::Instrument);
        assert_eq!(" SHIP ".parse::<SeriesField>().unwrap(), SeriesField::Ship);
        assert_eq!("serial number".parse::<SeriesField>().unwrap(), SeriesField::Serno);
        assert_eq!("serial_number".parse::<SeriesField>().unwrap(), SeriesField::Serno);
        assert_eq!("ctry".parse::<SeriesField>().unwrap(), SeriesField::Country);

        let err = "sbe".parse::<SeriesField>().unwrap_err();
        assert!(matches!(err, Error::InvalidCriterion { .. }));
        assert!(err.to_string().contains("instrument"));
    }

    #[test]
    fn test_series_field_display_roundtrip() {
        for field in SeriesField::ALL {
            assert_eq!(field.to_string().parse::<SeriesField>().unwrap(), field);
        }
    }

    #[test]
    fn test_criteria_builder_and_without() {
        let criteria = SeriesCriteria::new()
            .instrument("SBE09")
            .ship("77SE")
            .serno("0278");

        assert_eq!(criteria.len(), 3);
        assert_eq!(criteria.get(SeriesField::Serno), Some("0278"));

        let without = criteria.without(SeriesField::Serno);
        assert_eq!(without.len(), 2);
        assert_eq!(without.get(SeriesField::Serno), None);
        assert_eq!(without.get(SeriesField::Instrument), Some("SBE09"));
    }

    #[test]
    fn test_criteria_from_str() {
        let criteria: SeriesCriteria = "instrument=SBE09, ship = 77SE ,year=2021".parse().unwrap();
        assert_eq!(criteria.get(SeriesField::Instrument), Some("SBE09"));
        assert_eq!(criteria.get(SeriesField::Ship), Some("77SE"));
        assert_eq!(criteria.get(SeriesField::Year), Some("2021"));

        assert!("instrument".parse::<SeriesCriteria>().is_err());
        assert!("vessel=77SE".parse::<SeriesCriteria>().is_err());
        assert!("".parse::<SeriesCriteria>().unwrap().is_empty());
    }

    #[test]
    fn test_criteria_require_lists_every_missing_field() {
        let criteria = SeriesCriteria::new().instrument("SBE09").cruise("  ");

        let err = criteria
            .require(&[SeriesField::Instrument, SeriesField::Ship, SeriesField::Cruise])
            .unwrap_err();

        match err {
            Error::MissingFields { fields } => assert_eq!(fields, vec!["ship", "cruise"]),
            other => panic!("unexpected error: {other}"),
        }

        assert!(criteria.require(&[SeriesField::Instrument]).is_ok());
    }

    #[test]
    fn test_format_serno() {
        assert_eq!(format_serno(1), "0001");
        assert_eq!(format_serno(279), "0279");
        assert_eq!(format_serno(9999), "9999");
    }

    #[test]
    fn test_station_info_merges_convenience_keys() {
        let mut fields = BTreeMap::new();
        fields.insert("STATION_NAME".to_string(), "BY31 LANDSORTSDJ".to_string());
        fields.insert("WADEP".to_string(), "459".to_string());

        let record = StationRecord {
            name: "BY31 LANDSORTSDJ".to_string(),
            latitude: 58.59,
            longitude: 18.235,
            depth: "459".to_string(),
            out_of_bounds_radius: Some(1000.0),
            media: "Vatten".to_string(),
            synonyms: vec!["BY31".to_string()],
            fields,
        };
        assert!(record.validate().is_ok());

        let info = StationInfo::from_record(&record);
        assert_eq!(info.station, "BY31 LANDSORTSDJ");
        assert_eq!(info.get("station"), Some("BY31 LANDSORTSDJ"));
        assert_eq!(info.get("depth"), Some("459"));
        assert_eq!(info.get("lat"), Some("58.59"));
        assert_eq!(info.get("WADEP"), Some("459"));
    }

    #[test]
    fn test_station_record_validation() {
        let record = StationRecord {
            name: "X".to_string(),
            latitude: 95.0,
            longitude: 0.0,
            depth: String::new(),
            out_of_bounds_radius: None,
            media: String::new(),
            synonyms: Vec::new(),
            fields: BTreeMap::new(),
        };
        assert!(record.validate().is_err());
    }
}
