//! Station table loading
//!
//! Reads the tab-separated station reference table. The file is normally
//! Windows-1252 encoded; each field is decoded as UTF-8 when valid and as
//! Windows-1252 otherwise, so both encodings load unchanged. Only rows whose
//! `MEDIA` column marks them as water stations are kept.

use super::StationLocator;
use crate::app::models::StationRecord;
use crate::constants::{SYNONYM_DELIMITER, WATER_MEDIA_MARKER, station_columns};
use crate::{Error, Result};
use csv::{ByteRecord, ReaderBuilder};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Columns a station table must have
const REQUIRED_COLUMNS: [&str; 4] = [
    station_columns::STATION_NAME,
    station_columns::LATITUDE,
    station_columns::LONGITUDE,
    station_columns::MEDIA,
];

/// Statistics about loading a station table
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Data rows read from the file
    pub rows_read: usize,

    /// Water stations kept
    pub stations_loaded: usize,

    /// Rows dropped because they are not water stations
    pub records_filtered: usize,

    /// Water rows dropped because they could not be parsed
    pub rows_skipped: usize,

    pub load_duration: Duration,

    /// One message per skipped row
    pub errors: Vec<String>,
}

impl LoadStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Read {} rows, loaded {} stations ({} non-water, {} skipped) in {:.2}s",
            self.rows_read,
            self.stations_loaded,
            self.records_filtered,
            self.rows_skipped,
            self.load_duration.as_secs_f64()
        )
    }
}

impl StationLocator {
    /// Load the station table at `path`
    ///
    /// # Errors
    /// * `Error::FileNotFound` if the file does not exist
    /// * `Error::Configuration` if a required column is missing
    /// * `Error::CsvParsing` if the header row cannot be read
    pub fn load(path: &Path) -> Result<(Self, LoadStats)> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        let (mut locator, stats) =
            Self::from_reader(bytes.as_slice(), &path.display().to_string())?;
        locator.source = Some(path.to_path_buf());

        info!("Station table {}: {}", path.display(), stats.summary());
        Ok((locator, stats))
    }

    /// Parse a station table from any reader; `source` names it in messages
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let mut stats = LoadStats::default();

        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read header row", Some(e)))?
            .iter()
            .map(|h| decode_field(h).trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h.as_str() == *column))
            .collect();
        if !missing.is_empty() {
            return Err(Error::configuration(format!(
                "Station table {} is missing required column(s): {}",
                source,
                missing.join(", ")
            )));
        }

        let mut stations = Vec::new();
        let mut record = ByteRecord::new();
        let mut line = 1;
        loop {
            line += 1;
            match csv_reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => {
                    return Err(Error::csv_parsing(source, format!("Read failed at row {}", line), Some(e)));
                }
                Err(e) => {
                    warn!("Unreadable row {} in {}: {}", line, source, e);
                    stats.rows_skipped += 1;
                    stats.errors.push(format!("row {}: {}", line, e));
                    continue;
                }
            }
            stats.rows_read += 1;

            let fields = row_fields(&headers, &record);
            let media = fields
                .get(station_columns::MEDIA)
                .map(String::as_str)
                .unwrap_or_default();
            if !media.contains(WATER_MEDIA_MARKER) {
                stats.records_filtered += 1;
                continue;
            }

            match parse_station_row(fields) {
                Ok(station) => {
                    debug!("Loaded station '{}'", station.name);
                    stations.push(station);
                    stats.stations_loaded += 1;
                }
                Err(e) => {
                    warn!("Skipping row {} in {}: {}", line, source, e);
                    stats.rows_skipped += 1;
                    stats.errors.push(format!("row {}: {}", line, e));
                }
            }
        }

        stats.load_duration = start_time.elapsed();
        Ok((Self::from_records(stations), stats))
    }
}

/// Map each header to its trimmed value; short rows get empty values
fn row_fields(headers: &[String], record: &ByteRecord) -> BTreeMap<String, String> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let value = record.get(idx).map(decode_field).unwrap_or_default();
            (header.clone(), value.trim().to_string())
        })
        .collect()
}

fn parse_station_row(fields: BTreeMap<String, String>) -> Result<StationRecord> {
    let value = |column: &str| fields.get(column).cloned().unwrap_or_default();

    let name = value(station_columns::STATION_NAME);
    if name.is_empty() {
        return Err(Error::data_validation("Station name cannot be empty"));
    }

    let latitude = parse_coordinate(
        &name,
        station_columns::LATITUDE,
        &value(station_columns::LATITUDE),
    )?;
    let longitude = parse_coordinate(
        &name,
        station_columns::LONGITUDE,
        &value(station_columns::LONGITUDE),
    )?;

    let out_of_bounds_radius = value(station_columns::OUT_OF_BOUNDS_RADIUS)
        .parse::<f64>()
        .ok()
        .filter(|radius| radius.is_finite());

    let synonyms = value(station_columns::SYNONYM_NAMES)
        .split(SYNONYM_DELIMITER)
        .map(str::trim)
        .filter(|synonym| !synonym.is_empty())
        .map(str::to_string)
        .collect();

    let depth = value(station_columns::DEPTH);
    let media = value(station_columns::MEDIA);

    let station = StationRecord {
        name,
        latitude,
        longitude,
        depth,
        out_of_bounds_radius,
        media,
        synonyms,
        fields,
    };
    station.validate()?;

    Ok(station)
}

fn parse_coordinate(station: &str, column: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            Error::data_validation(format!(
                "Invalid {} '{}' for station '{}'",
                column, raw, station
            ))
        })
}

/// Decode a field as UTF-8, falling back to Windows-1252
pub(crate) fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| cp1252_char(b)).collect(),
    }
}

/// Windows-1252 differs from Latin-1 only in 0x80..=0x9F
fn cp1252_char(byte: u8) -> char {
    const HIGH_CONTROL: [char; 32] = [
        '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}',
        '\u{2021}', '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}',
        '\u{017D}', '\u{008F}', '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}',
        '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}',
        '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
    ];
    match byte {
        0x80..=0x9F => HIGH_CONTROL[(byte - 0x80) as usize],
        _ => byte as char,
    }
}
