//! Series registry for cast files in a data directory
//!
//! The registry scans a root directory, classifies every file by its structured
//! filename, and answers series queries: does a series exist, what is the latest
//! series number, and what is the next unused one for a combination of
//! instrument, ship, cruise and year.
//!
//! The index is an immutable [`SeriesIndex`] snapshot. A scan builds a fresh
//! snapshot off to the side and swaps it in under a write lock, so readers only
//! ever see a complete index.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

pub mod indexed_file;
pub mod pattern;
pub mod query;
pub mod scan;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use indexed_file::IndexedFile;
pub use pattern::FilenamePattern;
pub use scan::ScanStats;

/// How a registry is built from a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    /// Key the index by stem instead of full file name
    pub use_stem: bool,

    /// Only index files with this extension (case-insensitive, leading dot optional)
    pub required_suffix: Option<String>,

    /// Filename formats a stem is classified against
    pub patterns: Vec<FilenamePattern>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            use_stem: false,
            required_suffix: None,
            patterns: FilenamePattern::ALL.to_vec(),
        }
    }
}

impl SeriesOptions {
    /// Key the index by file stem
    pub fn with_stem_keys(mut self) -> Self {
        self.use_stem = true;
        self
    }

    /// Only index files with the given extension
    pub fn with_required_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.required_suffix = Some(suffix.into());
        self
    }

    /// Replace the set of recognised filename formats
    pub fn with_patterns(mut self, patterns: impl Into<Vec<FilenamePattern>>) -> Self {
        self.patterns = patterns.into();
        self
    }
}

/// Immutable snapshot of the classified files under a root directory
#[derive(Debug, Clone, Default)]
pub struct SeriesIndex {
    pub(crate) files: BTreeMap<String, IndexedFile>,
}

impl SeriesIndex {
    /// Number of indexed files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Get an indexed file by key (file name or stem, per options)
    pub fn get(&self, key: &str) -> Option<&IndexedFile> {
        self.files.get(key)
    }

    /// Iterate over `(key, file)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexedFile)> {
        self.files.iter().map(|(key, file)| (key.as_str(), file))
    }
}

/// Registry of cast files under one root directory
///
/// Created per root directory and options; holds nothing but the last scanned
/// snapshot. Queries before the first [`SeriesRegistry::scan`] see an empty index.
#[derive(Debug)]
pub struct SeriesRegistry {
    root: PathBuf,
    options: SeriesOptions,
    index: RwLock<Arc<SeriesIndex>>,
}

impl SeriesRegistry {
    /// Create an empty registry over `root`
    ///
    /// # Errors
    /// Returns `Error::NotADirectory` if `root` does not exist or is not a directory
    pub fn new(root: impl Into<PathBuf>, options: SeriesOptions) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::not_a_directory(root.display().to_string()));
        }

        Ok(Self {
            root,
            options,
            index: RwLock::new(Arc::new(SeriesIndex::default())),
        })
    }

    /// Create a registry and scan it once
    pub fn open(root: impl Into<PathBuf>, options: SeriesOptions) -> Result<Self> {
        let registry = Self::new(root, options)?;
        registry.scan()?;
        Ok(registry)
    }

    /// Root directory being indexed
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    /// The currently published index
    pub fn snapshot(&self) -> Arc<SeriesIndex> {
        let guard = self.index.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the published index in one step
    pub(crate) fn publish(&self, index: SeriesIndex) {
        let mut guard = self.index.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(index);
    }
}
