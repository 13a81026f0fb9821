//! CTD Pre-System Library
//!
//! Shipboard helpers used before a CTD cast is recorded.
//!
//! This library provides tools for:
//! - Classifying cast files by their structured filename (legacy and current formats)
//! - Deriving the latest and next series number for an instrument/ship/cruise combination
//! - Building the filename and raw file path for a new cast
//! - Resolving station synonyms and finding the closest station to a position fix
//! - Reading the ship and operator reference tables

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cast_name;
        pub mod operator_registry;
        pub mod series_registry;
        pub mod ship_registry;
        pub mod station_locator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{SeriesCriteria, SeriesField, StationRecord};
pub use app::services::series_registry::{FilenamePattern, SeriesRegistry};
pub use app::services::station_locator::StationLocator;
pub use config::PresystemConfig;

/// Result type alias for the CTD pre-system
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for series lookup, station lookup and configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV/TSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Path expected to be a directory is missing or is a file
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Required identifying fields were not supplied
    #[error("Missing information: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Criteria key that does not name a filename field
    #[error("Invalid criterion '{key}': expected one of {expected}")]
    InvalidCriterion { key: String, expected: String },

    /// Series number cannot be incremented within four digits
    #[error("Series number capacity exceeded: latest is {latest}, next would need more than 4 digits")]
    SernoCapacity { latest: String },

    /// Ship name or code not present in the ship table
    #[error("Could not find ship: {ship}")]
    UnknownShip { ship: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a missing fields error from the names of the absent fields
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid criterion error
    pub fn invalid_criterion(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidCriterion {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// Create a series number capacity error
    pub fn serno_capacity(latest: impl Into<String>) -> Self {
        Self::SernoCapacity {
            latest: latest.into(),
        }
    }

    /// Create an unknown ship error
    pub fn unknown_ship(ship: impl Into<String>) -> Self {
        Self::UnknownShip { ship: ship.into() }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
