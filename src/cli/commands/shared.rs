//! Shared components for CLI commands

use crate::app::services::ship_registry::ShipRegistry;
use crate::cli::args::GlobalArgs;
use crate::config::PresystemConfig;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Set up structured logging on stderr
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the configuration file named on the command line, or the default one
pub fn load_configuration(args: &GlobalArgs) -> Result<PresystemConfig> {
    let config = match &args.config_file {
        Some(path) => PresystemConfig::load(path)?,
        None => PresystemConfig::load_default()?,
    };
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Map a ship name to its code when a ship table is configured
pub fn resolve_ship_code(config: &PresystemConfig, ship: &str) -> Result<String> {
    match &config.ship_file {
        Some(path) => ShipRegistry::load(path)?.code(ship),
        None => Ok(ship.to_string()),
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::io("Failed to encode JSON output", e.into()))?;
    println!("{}", json);
    Ok(())
}
