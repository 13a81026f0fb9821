//! Configuration for the CTD pre-system
//!
//! Where the local and server data directories live, where the reference
//! tables are, and how the series registry classifies files. Loaded from a
//! TOML file or built in code.

use crate::app::services::series_registry::{SeriesOptions, SeriesRegistry};
use crate::app::services::station_locator::StationLocator;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DATA_DIR_NAME, DEFAULT_CRUISE_PREFIX};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresystemConfig {
    /// Local data directory; always ends in `data`
    pub data_root: PathBuf,

    /// Data directory on the file server, if casts are mirrored there
    pub server_data_root: Option<PathBuf>,

    /// Tab-separated station reference table
    pub station_file: Option<PathBuf>,

    /// Tab-separated ship table (`code`, `name`)
    pub ship_file: Option<PathBuf>,

    /// JSON operator table
    pub operator_file: Option<PathBuf>,

    /// Prefix of cruise labels such as `SMHI-01-2021`
    pub cruise_prefix: String,

    /// Series registry scan options
    pub series: SeriesOptions,
}

impl Default for PresystemConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DATA_DIR_NAME),
            server_data_root: None,
            station_file: None,
            ship_file: None,
            operator_file: None,
            cruise_prefix: DEFAULT_CRUISE_PREFIX.to_string(),
            series: SeriesOptions::default(),
        }
    }
}

/// Append `data` to a directory unless it already ends there
pub fn normalize_data_root(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|name| name == DATA_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(DATA_DIR_NAME)
    }
}

impl PresystemConfig {
    /// `<config dir>/ctd-presystem/config.toml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            Error::configuration(format!("{}: {}", path.display(), e))
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the file at [`Self::default_path`], or the defaults when there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Cannot serialize configuration: {}", e)))
    }

    /// Write the configuration, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("Failed to create {}", parent.display()), e))?;
        }
        std::fs::write(path, self.to_toml_string()?)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
    }

    fn normalized(mut self) -> Self {
        self.data_root = normalize_data_root(&self.data_root);
        self.server_data_root = self.server_data_root.as_deref().map(normalize_data_root);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cruise_prefix.trim().is_empty() {
            return Err(Error::configuration("cruise_prefix cannot be empty"));
        }
        Ok(())
    }

    pub fn with_data_root(mut self, path: impl AsRef<Path>) -> Self {
        self.data_root = normalize_data_root(path.as_ref());
        self
    }

    pub fn with_server_data_root(mut self, path: impl AsRef<Path>) -> Self {
        self.server_data_root = Some(normalize_data_root(path.as_ref()));
        self
    }

    pub fn with_station_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.station_file = Some(path.into());
        self
    }

    pub fn with_ship_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ship_file = Some(path.into());
        self
    }

    pub fn with_operator_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.operator_file = Some(path.into());
        self
    }

    pub fn with_series_options(mut self, options: SeriesOptions) -> Self {
        self.series = options;
        self
    }

    /// Local data root, or the server data root when `server` is set
    ///
    /// # Errors
    /// `Error::Configuration` if the server root is requested but not configured
    pub fn data_root(&self, server: bool) -> Result<&Path> {
        if server {
            self.server_data_root
                .as_deref()
                .ok_or_else(|| Error::configuration("No server data root configured"))
        } else {
            Ok(self.data_root.as_path())
        }
    }

    /// Create the local data directory if it is missing
    pub fn ensure_data_root(&self) -> Result<&Path> {
        if !self.data_root.is_dir() {
            std::fs::create_dir_all(&self.data_root).map_err(|e| {
                Error::io(format!("Failed to create {}", self.data_root.display()), e)
            })?;
            info!("Created data directory {}", self.data_root.display());
        }
        Ok(self.data_root.as_path())
    }

    /// Open and scan a series registry over the local or server data root
    pub fn series_registry(&self, server: bool) -> Result<SeriesRegistry> {
        SeriesRegistry::open(self.data_root(server)?, self.series.clone())
    }

    /// Load the configured station table
    pub fn station_locator(&self) -> Result<StationLocator> {
        let path = self
            .station_file
            .as_deref()
            .ok_or_else(|| Error::configuration("No station file configured"))?;
        StationLocator::load(path).map(|(locator, _)| locator)
    }
}
