//! Cast filename derivation
//!
//! Builds the current-format filename stem for a new cast and the raw file path
//! the acquisition program should write to. When no series number is supplied
//! it is taken from the series registry, so numbering stays consecutive within
//! an instrument/ship/cruise/year combination.

use crate::app::models::{SeriesCriteria, SeriesField};
use crate::app::services::series_registry::{FilenamePattern, SeriesRegistry};
use crate::constants::{CRUISE_WIDTH, RAW_DIR_NAME, RAW_FILE_SUFFIX, SERNO_WIDTH, STEM_SEPARATOR};
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A fully specified cast filename in the current format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastName {
    pub instrument: String,
    pub instrument_serial: String,
    /// `YYYYMMDD`
    pub date: String,
    /// `HHMM`
    pub time: String,
    /// Country and ship code, e.g. `77SE`
    pub ship: String,
    pub cruise: String,
    pub serno: String,
}

impl CastName {
    /// Assemble a name from already formatted tokens
    pub fn from_parts(
        instrument: impl Into<String>,
        instrument_serial: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        ship: impl Into<String>,
        cruise: impl Into<String>,
        serno: impl Into<String>,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            instrument_serial: instrument_serial.into(),
            date: date.into(),
            time: time.into(),
            ship: ship.into(),
            cruise: cruise.into(),
            serno: serno.into(),
        }
    }

    /// Filename stem, e.g. `SBE09_1387_20210413_1113_77SE_01_0278`
    pub fn stem(&self) -> String {
        let separator = STEM_SEPARATOR.to_string();
        [
            self.instrument.as_str(),
            self.instrument_serial.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.ship.as_str(),
            self.cruise.as_str(),
            self.serno.as_str(),
        ]
        .join(separator.as_str())
    }

    /// Four digit year of the cast
    pub fn year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }

    /// File name with the given extension
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}.{}", self.stem(), suffix.trim_start_matches('.'))
    }

    /// Where the acquisition program writes the raw file: `<data_root>/raw/<stem>.hex`
    pub fn raw_file_path(&self, data_root: &Path) -> PathBuf {
        data_root
            .join(RAW_DIR_NAME)
            .join(self.file_name(RAW_FILE_SUFFIX))
    }

    /// Cruise label written into the acquisition header, e.g. `SMHI-01-2021`
    pub fn cruise_label(&self, prefix: &str) -> String {
        format!("{}-{}-{}", prefix, self.cruise, self.year())
    }

    /// Criteria selecting the series this cast belongs to
    pub fn series_criteria(&self) -> SeriesCriteria {
        SeriesCriteria::new()
            .instrument(&self.instrument)
            .ship(&self.ship)
            .cruise(&self.cruise)
            .year(self.year())
    }
}

impl fmt::Display for CastName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Collects the identifying fields of a new cast
///
/// Every field is optional until [`CastNameBuilder::build`], which reports all
/// missing fields at once so an operator can fix them in one go.
#[derive(Debug, Clone, Default)]
pub struct CastNameBuilder {
    instrument: Option<String>,
    instrument_serial: Option<String>,
    timestamp: Option<NaiveDateTime>,
    ship: Option<String>,
    cruise: Option<String>,
    serno: Option<String>,
}

impl CastNameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = non_empty(instrument.into());
        self
    }

    pub fn instrument_serial(mut self, serial: impl Into<String>) -> Self {
        self.instrument_serial = non_empty(serial.into());
        self
    }

    /// Cast start time; defaults to local now when not set
    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Combined country and ship code, e.g. `77SE`
    pub fn ship(mut self, ship_code: impl Into<String>) -> Self {
        self.ship = non_empty(ship_code.into());
        self
    }

    /// Cruise number; zero-padded to two digits
    pub fn cruise(mut self, cruise: impl Into<String>) -> Self {
        self.cruise = non_empty(cruise.into()).map(|c| zero_pad(&c, CRUISE_WIDTH));
        self
    }

    /// Series number; zero-padded to four digits
    pub fn serno(mut self, serno: impl Into<String>) -> Self {
        self.serno = non_empty(serno.into()).map(|s| zero_pad(&s, SERNO_WIDTH));
        self
    }

    fn resolved_timestamp(&self) -> NaiveDateTime {
        self.timestamp
            .unwrap_or_else(|| Local::now().naive_local())
    }

    fn missing_fields(&self, include_serno: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.instrument.is_none() {
            missing.push(SeriesField::Instrument.as_str());
        }
        if self.instrument_serial.is_none() {
            missing.push(SeriesField::InstrumentSerial.as_str());
        }
        if self.ship.is_none() {
            missing.push(SeriesField::Ship.as_str());
        }
        if self.cruise.is_none() {
            missing.push(SeriesField::Cruise.as_str());
        }
        if include_serno && self.serno.is_none() {
            missing.push(SeriesField::Serno.as_str());
        }
        missing
    }

    /// Build the name from the supplied fields
    ///
    /// # Errors
    /// * `Error::MissingFields` listing every absent field
    /// * `Error::DataValidation` if the fields do not form a current-format stem
    pub fn build(self) -> Result<CastName> {
        let missing = self.missing_fields(true);
        if !missing.is_empty() {
            return Err(Error::missing_fields(missing));
        }

        let timestamp = self.resolved_timestamp();
        let name = CastName {
            instrument: self.instrument.unwrap_or_default(),
            instrument_serial: self.instrument_serial.unwrap_or_default(),
            date: timestamp.format("%Y%m%d").to_string(),
            time: timestamp.format("%H%M").to_string(),
            ship: self.ship.unwrap_or_default(),
            cruise: self.cruise.unwrap_or_default(),
            serno: self.serno.unwrap_or_default(),
        };

        let stem = name.stem();
        if !FilenamePattern::Current.matches(&stem) {
            return Err(Error::data_validation(format!(
                "'{}' does not follow the cast filename format (example: {})",
                stem,
                FilenamePattern::Current.example()
            )));
        }

        Ok(name)
    }

    /// Build the name, taking the next series number from `registry`
    ///
    /// An explicitly supplied series number is kept as is. The registry is
    /// queried with instrument, ship, cruise and the cast year; it should have
    /// been scanned just before so the number reflects what is on disk.
    pub fn build_with_next_serno(mut self, registry: &SeriesRegistry) -> Result<CastName> {
        if self.serno.is_none() {
            let missing = self.missing_fields(false);
            if !missing.is_empty() {
                return Err(Error::missing_fields(missing));
            }

            let timestamp = self.resolved_timestamp();
            self.timestamp = Some(timestamp);

            let criteria = SeriesCriteria::new()
                .instrument(self.instrument.clone().unwrap_or_default())
                .ship(self.ship.clone().unwrap_or_default())
                .cruise(self.cruise.clone().unwrap_or_default())
                .year(timestamp.format("%Y").to_string());

            let serno = registry.next_serno(&criteria)?;
            debug!("Assigned series number {} for {:?}", serno, criteria);
            self.serno = Some(serno);
        }

        self.build()
    }
}

/// Build the name for the next cast in the builder's series
pub fn next_cast_name(registry: &SeriesRegistry, builder: CastNameBuilder) -> Result<CastName> {
    builder.build_with_next_serno(registry)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn zero_pad(value: &str, width: usize) -> String {
    format!("{:0>width$}", value, width = width)
}
