//! Series queries over the registry index
//!
//! All queries read one published snapshot, so a concurrent rescan never shows
//! a half-built index to a running query.

use super::{IndexedFile, SeriesIndex, SeriesRegistry};
use crate::app::models::{SeriesCriteria, SeriesField, format_serno};
use crate::constants::{FIRST_SERNO, MAX_SERNO};
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

impl SeriesIndex {
    /// Indexed files matching every supplied criterion, keyed as in the index
    pub fn files_matching(&self, criteria: &SeriesCriteria) -> Vec<(&str, &IndexedFile)> {
        self.iter()
            .filter(|(_, file)| file.is_matching(criteria))
            .collect()
    }

    /// Highest series number among matching files, ignoring any `serno` criterion
    ///
    /// Series numbers are fixed-width and zero-padded, so the string maximum is
    /// also the numeric maximum.
    pub fn latest_serno(&self, criteria: &SeriesCriteria) -> Option<String> {
        let criteria = criteria.without(SeriesField::Serno);
        self.files_matching(&criteria)
            .into_iter()
            .filter_map(|(_, file)| file.serno())
            .max()
            .map(str::to_string)
    }
}

/// The series number following `latest`
///
/// # Errors
/// Returns `Error::SernoCapacity` when the result would need more than four digits
pub fn increment_serno(latest: &str) -> Result<String> {
    let value: u32 = latest.parse().map_err(|_| {
        Error::data_validation(format!("Invalid series number '{}'", latest))
    })?;

    if value >= MAX_SERNO {
        return Err(Error::serno_capacity(latest));
    }

    Ok(format_serno(value + 1))
}

impl SeriesRegistry {
    /// Number of indexed files
    pub fn count(&self) -> usize {
        self.snapshot().len()
    }

    /// Index keys in order
    pub fn keys(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|(key, _)| key.to_string())
            .collect()
    }

    /// Files matching every supplied criterion, keyed as in the index
    ///
    /// A criterion is skipped for a file whose format does not carry that field
    /// (or carries an empty value); see [`IndexedFile::is_matching`].
    pub fn files_matching(&self, criteria: &SeriesCriteria) -> BTreeMap<String, IndexedFile> {
        self.snapshot()
            .files_matching(criteria)
            .into_iter()
            .map(|(key, file)| (key.to_string(), file.clone()))
            .collect()
    }

    /// Highest series number among files matching `criteria`, `None` when nothing matches
    pub fn latest_serno(&self, criteria: &SeriesCriteria) -> Option<String> {
        self.snapshot().latest_serno(criteria)
    }

    /// Next unused series number for `criteria`
    ///
    /// Returns `"0001"` when no file matches.
    ///
    /// # Errors
    /// Returns `Error::SernoCapacity` when the latest matching series is `9999`
    pub fn next_serno(&self, criteria: &SeriesCriteria) -> Result<String> {
        let next = match self.latest_serno(criteria) {
            Some(latest) => increment_serno(&latest)?,
            None => FIRST_SERNO.to_string(),
        };
        debug!("Next series number for {:?}: {}", criteria, next);
        Ok(next)
    }

    /// Whether any file matches `criteria`
    pub fn series_exists(&self, criteria: &SeriesCriteria) -> bool {
        self.snapshot()
            .iter()
            .any(|(_, file)| file.is_matching(criteria))
    }

    /// Key of the first matching file, `None` when nothing matches
    pub fn series_exists_file_name(&self, criteria: &SeriesCriteria) -> Option<String> {
        self.snapshot()
            .iter()
            .find(|(_, file)| file.is_matching(criteria))
            .map(|(key, _)| key.to_string())
    }
}
