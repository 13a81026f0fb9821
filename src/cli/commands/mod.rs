//! Command implementations for the CTD pre-system CLI
//!
//! Each command lives in its own module:
//! - `series`: series registry queries over a data directory
//! - `stations`: station name resolution and closest-station lookups
//! - `cast_name`: filename and raw file path for a new cast
//! - `reference`: ship and operator table listings

pub mod cast_name;
pub mod reference;
pub mod series;
pub mod shared;
pub mod stations;

use crate::Result;
use crate::cli::args::{Args, Commands};
use shared::{load_configuration, setup_logging};
use tracing::debug;

/// Run the subcommand selected on the command line
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args.global)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args.global)?;
    let format = args.global.output_format;

    let Some(command) = args.command else {
        return Ok(());
    };

    match command {
        Commands::Series(series_args) => series::run_series(&series_args, &config, format),
        Commands::Station(station_args) => stations::run_station(&station_args, &config, format),
        Commands::CastName(cast_args) => cast_name::run_cast_name(&cast_args, &config, format),
        Commands::Ships => reference::run_ships(&config, format),
        Commands::Operators => reference::run_operators(&config, format),
    }
}
