//! Ship reference table
//!
//! Maps between ship codes (`77SE`) and ship names (`Svea`). The table is a
//! tab-separated file with a `code` and a `name` column; either value may be
//! used to look up the other. Like the station table it may be Windows-1252
//! encoded.

use crate::app::services::station_locator::loader::decode_field;
use crate::constants::{SHIP_CODE_COLUMN, SHIP_NAME_COLUMN};
use crate::{Error, Result};
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of the ship table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShipRegistry {
    ships: Vec<Ship>,
    code_to_name: HashMap<String, String>,
    name_to_code: HashMap<String, String>,
}

impl ShipRegistry {
    /// Load the ship table from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        let registry = Self::from_reader(file, &path.display().to_string())?;

        info!(
            "Loaded {} ships from {}",
            registry.ships.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a ship table from any reader; `source` names it in error messages
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read header row", Some(e)))?
            .iter()
            .map(|h| decode_field(h).trim_start_matches('\u{feff}').to_string())
            .collect();

        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                Error::configuration(format!(
                    "Ship table {} is missing the '{}' column",
                    source, name
                ))
            })
        };
        let code_idx = column(SHIP_CODE_COLUMN)?;
        let name_idx = column(SHIP_NAME_COLUMN)?;

        let mut ships = Vec::new();
        for (row, record) in csv_reader.byte_records().enumerate() {
            let record = record.map_err(|e| {
                Error::csv_parsing(source, format!("Malformed row {}", row + 2), Some(e))
            })?;

            let code = record.get(code_idx).map(decode_field).unwrap_or_default();
            let name = record.get(name_idx).map(decode_field).unwrap_or_default();
            if code.is_empty() && name.is_empty() {
                continue;
            }

            ships.push(Ship { code, name });
        }

        Ok(Self::from_ships(ships))
    }

    pub fn from_ships(ships: Vec<Ship>) -> Self {
        let mut code_to_name = HashMap::new();
        let mut name_to_code = HashMap::new();
        for ship in &ships {
            if let Some(previous) = code_to_name.insert(ship.code.clone(), ship.name.clone()) {
                debug!("Ship code {} listed twice, '{}' replaced", ship.code, previous);
            }
            name_to_code.insert(ship.name.clone(), ship.code.clone());
        }

        Self {
            ships,
            code_to_name,
            name_to_code,
        }
    }

    fn contains(&self, ship: &str) -> bool {
        self.code_to_name.contains_key(ship) || self.name_to_code.contains_key(ship)
    }

    /// Ship code for a name or code
    ///
    /// # Errors
    /// `Error::UnknownShip` if the value is neither a known name nor a known code
    pub fn code(&self, name_or_code: &str) -> Result<String> {
        if !self.contains(name_or_code) {
            return Err(Error::unknown_ship(name_or_code));
        }
        Ok(self
            .name_to_code
            .get(name_or_code)
            .cloned()
            .unwrap_or_else(|| name_or_code.to_string()))
    }

    /// Ship name for a code or name
    pub fn name(&self, code_or_name: &str) -> Result<String> {
        if !self.contains(code_or_name) {
            return Err(Error::unknown_ship(code_or_name));
        }
        Ok(self
            .code_to_name
            .get(code_or_name)
            .cloned()
            .unwrap_or_else(|| code_or_name.to_string()))
    }

    /// Rows in table order
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}
