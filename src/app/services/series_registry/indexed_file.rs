//! A cast file that matched one of the known filename formats

use super::pattern::FilenamePattern;
use crate::app::models::{SeriesCriteria, SeriesField};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One on-disk file whose stem matched a [`FilenamePattern`]
///
/// Field values are extracted once at classification time; the struct is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedFile {
    /// Full path to the file
    pub path: PathBuf,

    /// File name including extension
    pub name: String,

    /// File name without extension
    pub stem: String,

    /// Extension without the leading dot, if any
    pub suffix: Option<String>,

    /// The format the stem matched
    pub pattern: FilenamePattern,

    fields: BTreeMap<SeriesField, String>,
}

impl IndexedFile {
    /// Classify a path against the given formats
    ///
    /// Returns `None` when the stem matches none of them or is not valid UTF-8.
    pub fn classify(path: &Path, patterns: &[FilenamePattern]) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?.to_string();
        let suffix = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_string);

        let pattern = FilenamePattern::classify(&stem, patterns)?;

        let fields = SeriesField::ALL
            .iter()
            .filter_map(|field| {
                pattern
                    .extract(&stem, *field)
                    .map(|value| (*field, value))
            })
            .collect();

        Some(Self {
            path: path.to_path_buf(),
            name,
            stem,
            suffix,
            pattern,
            fields,
        })
    }

    /// Extracted value of a field, `None` when the format does not carry it
    pub fn get(&self, field: SeriesField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Series number of this file
    pub fn serno(&self) -> Option<&str> {
        self.get(SeriesField::Serno)
    }

    /// Check every supplied criterion against the extracted fields
    ///
    /// A criterion whose extracted value is missing or empty is skipped rather
    /// than failed, so legacy files without a cruise still match a query that
    /// names a cruise.
    pub fn is_matching(&self, criteria: &SeriesCriteria) -> bool {
        criteria.iter().all(|(field, wanted)| match self.get(field) {
            None => true,
            Some(value) if value.is_empty() => true,
            Some(value) => value == wanted,
        })
    }
}
