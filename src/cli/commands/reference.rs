//! Ship and operator table listings

use super::shared::print_json;
use crate::app::services::operator_registry::OperatorRegistry;
use crate::app::services::ship_registry::ShipRegistry;
use crate::cli::args::OutputFormat;
use crate::config::PresystemConfig;
use crate::{Error, Result};
use colored::*;
use std::collections::BTreeMap;

pub fn run_ships(config: &PresystemConfig, format: OutputFormat) -> Result<()> {
    let path = config
        .ship_file
        .as_deref()
        .ok_or_else(|| Error::configuration("No ship_file configured"))?;
    let ships = ShipRegistry::load(path)?;

    match format {
        OutputFormat::Json => print_json(ships.ships())?,
        OutputFormat::Human => {
            for ship in ships.ships() {
                println!("{}  {}", ship.code.cyan(), ship.name);
            }
        }
    }
    Ok(())
}

pub fn run_operators(config: &PresystemConfig, format: OutputFormat) -> Result<()> {
    let path = config
        .operator_file
        .as_deref()
        .ok_or_else(|| Error::configuration("No operator_file configured"))?;
    let operators = OperatorRegistry::load(path)?;

    match format {
        OutputFormat::Json => {
            let table: BTreeMap<&str, &str> = operators
                .operator_list()
                .into_iter()
                .filter_map(|short| operators.full_name(short).map(|full| (short, full)))
                .collect();
            print_json(&table)?
        }
        OutputFormat::Human => {
            for short in operators.operator_list() {
                println!(
                    "{:<6} {}",
                    short.cyan(),
                    operators.full_name(short).unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}
