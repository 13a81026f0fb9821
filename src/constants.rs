//! Application constants for the CTD pre-system
//!
//! Filename grammar fragments, station table column names, and the
//! defaults used by configuration and the CLI.

// =============================================================================
// Cast Filenames
// =============================================================================

/// Separator between tokens in a cast filename stem
pub const STEM_SEPARATOR: char = '_';

/// Width of the zero-padded series number token
pub const SERNO_WIDTH: usize = 4;

/// Largest series number that still fits in [`SERNO_WIDTH`] digits
pub const MAX_SERNO: u32 = 9999;

/// Series number handed out when no earlier cast matches
pub const FIRST_SERNO: &str = "0001";

/// Width of the zero-padded cruise token
pub const CRUISE_WIDTH: usize = 2;

/// Extension of raw files written by the acquisition program
pub const RAW_FILE_SUFFIX: &str = "hex";

/// Sub-directory of the data root holding raw files
pub const RAW_DIR_NAME: &str = "raw";

/// Name the data root directory is normalized to end with
pub const DATA_DIR_NAME: &str = "data";

/// Prefix used when formatting a cruise label such as `SMHI-01-2021`
pub const DEFAULT_CRUISE_PREFIX: &str = "SMHI";

/// Regular grammar and example stem for each filename format version
pub mod filename_formats {
    /// Current format: combined country+ship token followed by a cruise token
    pub const CURRENT_PATTERN: &str =
        r"^[^_]+_\d{4}_\d{8}_\d{4}_\d{2}[A-Za-z]{2}_\d{2}_\d{4}$";
    pub const CURRENT_EXAMPLE: &str = "SBE09_1387_20210413_1113_77SE_01_0278";

    /// Legacy format: separate numeric country and ship tokens, no cruise
    pub const LEGACY_PATTERN: &str = r"^[^_]+_\d{4}_\d{8}_\d{4}_\d{2}_\d{2}_\d{4}$";
    pub const LEGACY_EXAMPLE: &str = "SBE09_0745_20150218_1040_34_01_0122";
}

// =============================================================================
// Station Reference Table
// =============================================================================

/// Column names in the tab-separated station table
pub mod station_columns {
    pub const STATION_NAME: &str = "STATION_NAME";
    pub const LATITUDE: &str = "LATITUDE_WGS84_SWEREF99_DD";
    pub const LONGITUDE: &str = "LONGITUDE_WGS84_SWEREF99_DD";
    pub const DEPTH: &str = "WADEP";
    pub const MEDIA: &str = "MEDIA";
    pub const SYNONYM_NAMES: &str = "SYNONYM_NAMES";
    pub const OUT_OF_BOUNDS_RADIUS: &str = "OUT_OF_BOUNDS_RADIUS";
}

/// Keys merged into a station row by `station_info`
pub mod station_info_keys {
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const DEPTH: &str = "depth";
    pub const STATION: &str = "station";
}

/// Substring of the `MEDIA` column marking a water station
pub const WATER_MEDIA_MARKER: &str = "Vatten";

/// Delimiter between names in the `SYNONYM_NAMES` column
pub const SYNONYM_DELIMITER: &str = "<or>";

/// Earth radius used for station distances, in kilometres
pub const EARTH_RADIUS_KM: f64 = 6363.0;

// =============================================================================
// Ship Reference Table
// =============================================================================

pub const SHIP_CODE_COLUMN: &str = "code";
pub const SHIP_NAME_COLUMN: &str = "name";

// =============================================================================
// Configuration and CLI
// =============================================================================

/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "ctd-presystem";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default tracing directive target
pub const LOG_TARGET: &str = "ctd_presystem";
