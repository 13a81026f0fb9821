//! Operator reference table
//!
//! A JSON object mapping operator short names (initials) to full names.

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorRegistry {
    operators: BTreeMap<String, String>,
}

impl OperatorRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        let registry = Self::from_json(&content).map_err(|e| match e {
            Error::DataValidation { message } => {
                Error::data_validation(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        info!(
            "Loaded {} operators from {}",
            registry.operators.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let operators: BTreeMap<String, String> = serde_json::from_str(content)
            .map_err(|e| Error::data_validation(format!("Invalid operator table: {}", e)))?;
        Ok(Self { operators })
    }

    /// Write the table back as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.operators)
            .map_err(|e| Error::data_validation(format!("Cannot serialize operators: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    /// Add or replace an operator
    pub fn insert(&mut self, short_name: impl Into<String>, full_name: impl Into<String>) {
        self.operators.insert(short_name.into(), full_name.into());
    }

    /// Short names, sorted
    pub fn operator_list(&self) -> Vec<&str> {
        self.operators.keys().map(String::as_str).collect()
    }

    pub fn full_name(&self, short_name: &str) -> Option<&str> {
        self.operators.get(short_name).map(String::as_str)
    }
}
