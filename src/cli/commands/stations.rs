//! Station command: name resolution and closest-station lookups

use super::shared::print_json;
use crate::app::models::StationMatch;
use crate::app::services::station_locator::StationLocator;
use crate::cli::args::{OutputFormat, StationAction, StationArgs};
use crate::config::PresystemConfig;
use crate::{Error, Result};
use colored::*;
use serde_json::json;
use tracing::info;

/// Load the station table named on the command line or in the configuration
pub fn load_locator(args: &StationArgs, config: &PresystemConfig) -> Result<StationLocator> {
    let path = args
        .station_file
        .as_deref()
        .or(config.station_file.as_deref())
        .ok_or_else(|| {
            Error::configuration("No station file given; use --station-file or set station_file")
        })?;

    let (locator, stats) = StationLocator::load(path)?;
    info!("{}", stats.summary());
    Ok(locator)
}

pub fn run_station(args: &StationArgs, config: &PresystemConfig, format: OutputFormat) -> Result<()> {
    let locator = load_locator(args, config)?;

    match &args.action {
        StationAction::Resolve { name } => {
            let proper = locator.proper_station_name(name);
            match format {
                OutputFormat::Json => print_json(&json!({ "query": name, "station": proper }))?,
                OutputFormat::Human => match proper {
                    Some(proper) => println!("{}", proper.green().bold()),
                    None => println!("{} '{}'", "Unknown station".yellow(), name),
                },
            }
        }
        StationAction::Info { name } => {
            let info = locator.station_info(name);
            match format {
                OutputFormat::Json => print_json(&info)?,
                OutputFormat::Human => match info {
                    Some(info) => {
                        println!("{}", info.station.green().bold());
                        for (key, value) in &info.fields {
                            println!("  {:<32} {}", key.cyan(), value);
                        }
                    }
                    None => println!("{} '{}'", "Unknown station".yellow(), name),
                },
            }
        }
        StationAction::Closest { lat, lon } => {
            let matches = locator.closest_station(Some(*lat), Some(*lon));
            match format {
                OutputFormat::Json => print_json(&matches)?,
                OutputFormat::Human => match matches {
                    Some(matches) => {
                        for station in &matches {
                            print_match(station);
                        }
                    }
                    None => println!("{}", "No stations loaded".yellow()),
                },
            }
        }
        StationAction::List => {
            let names = locator.station_list();
            match format {
                OutputFormat::Json => print_json(&names)?,
                OutputFormat::Human => {
                    for name in &names {
                        println!("{}", name);
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_match(station: &StationMatch) {
    let verdict = if station.acceptable {
        "within radius".green()
    } else {
        "outside radius".red()
    };
    println!(
        "{}  {} m  ({})",
        station.info.station.bold(),
        station.distance,
        verdict
    );
}
