//! Directory scanning for the series registry

use super::{IndexedFile, SeriesIndex, SeriesRegistry};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Statistics about one directory scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Regular files visited
    pub files_visited: usize,

    /// Files that entered the index
    pub files_indexed: usize,

    /// Files whose stem matched no known format
    pub unmatched_stems: usize,

    /// Files dropped by the required suffix filter
    pub suffix_mismatches: usize,

    /// Keys seen more than once (the later file wins)
    pub duplicate_keys: usize,

    /// Directory entries that could not be read
    pub walk_errors: usize,

    /// Time taken by the scan
    pub duration: Duration,
}

impl ScanStats {
    /// Files visited but left out of the index
    pub fn files_skipped(&self) -> usize {
        self.unmatched_stems + self.suffix_mismatches
    }

    pub fn summary(&self) -> String {
        format!(
            "Indexed {} of {} files ({} unmatched, {} wrong suffix) in {:.3}s",
            self.files_indexed,
            self.files_visited,
            self.unmatched_stems,
            self.suffix_mismatches,
            self.duration.as_secs_f64()
        )
    }
}

impl SeriesRegistry {
    /// Rebuild the index from the root directory
    ///
    /// Walks the root recursively without a depth limit. Files whose stem
    /// matches no known format, or whose extension differs from the required
    /// suffix, are left out. The new index replaces the old one in a single step.
    ///
    /// # Errors
    /// Returns `Error::NotADirectory` if the root has disappeared since construction
    pub fn scan(&self) -> Result<ScanStats> {
        let start_time = Instant::now();
        info!("Scanning for cast files in: {}", self.root.display());

        if !self.root.is_dir() {
            return Err(Error::not_a_directory(self.root.display().to_string()));
        }

        let mut stats = ScanStats::default();
        let mut files = BTreeMap::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    stats.walk_errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            stats.files_visited += 1;

            let path = entry.path();
            let Some(file) = IndexedFile::classify(path, &self.options.patterns) else {
                debug!("No filename format matches: {}", path.display());
                stats.unmatched_stems += 1;
                continue;
            };

            if !self.suffix_matches(file.suffix.as_deref()) {
                debug!("Suffix filter excludes: {}", path.display());
                stats.suffix_mismatches += 1;
                continue;
            }

            let key = if self.options.use_stem {
                file.stem.clone()
            } else {
                file.name.clone()
            };

            if let Some(previous) = files.insert(key.clone(), file) {
                debug!(
                    "Key '{}' seen again, replacing {}",
                    key,
                    previous.path.display()
                );
                stats.duplicate_keys += 1;
            }
        }

        stats.files_indexed = files.len();
        self.publish(SeriesIndex { files });
        stats.duration = start_time.elapsed();

        info!("{}", stats.summary());
        Ok(stats)
    }

    fn suffix_matches(&self, suffix: Option<&str>) -> bool {
        let Some(required) = self.options.required_suffix.as_deref() else {
            return true;
        };
        let required = required.trim_start_matches('.');

        suffix.is_some_and(|suffix| suffix.eq_ignore_ascii_case(required))
    }
}
