//! Command-line argument definitions for the CTD pre-system
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::{SeriesCriteria, SeriesField};
use crate::app::services::series_registry::SeriesOptions;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the CTD pre-system
///
/// Helpers used on board before a CTD cast is recorded: series numbering,
/// cast file naming and station lookups.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ctd-presystem",
    version,
    about = "Series numbering, cast naming and station lookup for shipboard CTD casts",
    long_about = "Scans a CTD data directory for structured cast filenames to find the latest \
                  and next series number, builds the filename and raw file path for a new cast, \
                  and resolves station names or finds the closest station to a position fix."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options accepted by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct GlobalArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ctd-presystem/config.toml in the user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Query the series registry of a data directory
    Series(SeriesArgs),

    /// Resolve station names and find the closest station
    Station(StationArgs),

    /// Build the filename and raw file path for a new cast
    CastName(CastNameArgs),

    /// List the ships of the ship table
    Ships,

    /// List the operators of the operator table
    Operators,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Which data directory to scan
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ScanArgs {
    /// Data directory to scan instead of the configured one
    #[arg(long = "root", value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Scan the configured server data directory
    #[arg(long = "server", conflicts_with = "root")]
    pub server: bool,

    /// Only index files with this extension
    #[arg(long = "suffix", value_name = "EXT")]
    pub suffix: Option<String>,

    /// Key the index by file stem so companion files collapse into one cast
    #[arg(long = "use-stem")]
    pub use_stem: bool,
}

impl ScanArgs {
    /// Merge command-line scan options over configured ones
    pub fn series_options(&self, configured: &SeriesOptions) -> SeriesOptions {
        let mut options = configured.clone();
        if self.use_stem {
            options.use_stem = true;
        }
        if let Some(suffix) = &self.suffix {
            options.required_suffix = Some(suffix.clone());
        }
        options
    }
}

/// Series selection criteria
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CriteriaArgs {
    #[arg(long = "instrument", value_name = "NAME")]
    pub instrument: Option<String>,

    /// Ship code (e.g. 77SE) or, with a ship table configured, ship name
    #[arg(long = "ship", value_name = "SHIP")]
    pub ship: Option<String>,

    #[arg(long = "cruise", value_name = "NR")]
    pub cruise: Option<String>,

    #[arg(long = "year", value_name = "YYYY")]
    pub year: Option<String>,

    #[arg(long = "serno", value_name = "NR")]
    pub serno: Option<String>,

    /// Any filename field, e.g. --where instrument_serial=1387
    #[arg(long = "where", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

impl CriteriaArgs {
    /// Combine `--where` pairs with the named flags; named flags win
    pub fn criteria(&self) -> Result<SeriesCriteria> {
        let mut criteria = SeriesCriteria::parse_pairs(&self.filters)?;
        for (field, value) in [
            (SeriesField::Instrument, &self.instrument),
            (SeriesField::Ship, &self.ship),
            (SeriesField::Cruise, &self.cruise),
            (SeriesField::Year, &self.year),
            (SeriesField::Serno, &self.serno),
        ] {
            if let Some(value) = value {
                criteria.insert(field, value.clone());
            }
        }
        Ok(criteria)
    }
}

/// Series registry queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesAction {
    /// Number of indexed files
    Count,
    /// Indexed files matching the criteria
    List,
    /// Latest series number matching the criteria
    Latest,
    /// Next free series number for the criteria
    Next,
    /// Whether any file matches the criteria
    Exists,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SeriesArgs {
    #[arg(value_enum)]
    pub action: SeriesAction,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub criteria: CriteriaArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StationArgs {
    #[command(subcommand)]
    pub action: StationAction,

    /// Station table to use instead of the configured one
    #[arg(long = "station-file", value_name = "FILE", global = true)]
    pub station_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum StationAction {
    /// Canonical name for a station name or synonym
    Resolve { name: String },

    /// Full table row for a station
    Info { name: String },

    /// Station(s) closest to a position
    Closest {
        #[arg(long = "lat", allow_negative_numbers = true)]
        lat: f64,

        #[arg(long = "lon", allow_negative_numbers = true)]
        lon: f64,
    },

    /// All station names
    List,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CastNameArgs {
    #[arg(long = "instrument", value_name = "NAME")]
    pub instrument: Option<String>,

    #[arg(long = "serial", value_name = "NR")]
    pub instrument_serial: Option<String>,

    /// Ship code (e.g. 77SE) or, with a ship table configured, ship name
    #[arg(long = "ship", value_name = "SHIP")]
    pub ship: Option<String>,

    #[arg(long = "cruise", value_name = "NR")]
    pub cruise: Option<String>,

    /// Series number; taken from the data directory when omitted
    #[arg(long = "serno", value_name = "NR")]
    pub serno: Option<String>,

    /// Cast start time, "YYYY-MM-DD HH:MM"; defaults to now
    #[arg(long = "time", value_name = "TIME", value_parser = parse_cast_time)]
    pub time: Option<NaiveDateTime>,

    #[command(flatten)]
    pub scan: ScanArgs,
}

/// Parse "YYYY-MM-DD HH:MM" or "YYYY-MM-DDTHH:MM"
pub fn parse_cast_time(value: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y%m%d%H%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| {
            Error::data_validation(format!(
                "Invalid cast time '{}': expected YYYY-MM-DD HH:MM",
                value
            ))
        })
}

impl GlobalArgs {
    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
