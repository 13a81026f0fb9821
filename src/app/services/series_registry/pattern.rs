//! Filename format versions for cast files
//!
//! Each [`FilenamePattern`] variant knows the regular grammar of one version of
//! the cast filename convention and how to pull semantic fields out of a stem
//! of that version. Adding a format means adding a variant here; callers never
//! branch on the version themselves.

use crate::app::models::SeriesField;
use crate::constants::{STEM_SEPARATOR, filename_formats};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static CURRENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(filename_formats::CURRENT_PATTERN).expect("current filename pattern is valid")
});

static LEGACY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(filename_formats::LEGACY_PATTERN).expect("legacy filename pattern is valid")
});

/// Number of underscore separated tokens in every known format
const TOKEN_COUNT: usize = 7;

/// A version of the cast filename convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenamePattern {
    /// `SBE09_0745_20150218_1040_34_01_0122`: country and ship as separate
    /// numeric tokens, no cruise
    Legacy,

    /// `SBE09_1387_20210413_1113_77SE_01_0278`: combined country+ship token
    /// followed by a cruise token
    Current,
}

impl FilenamePattern {
    /// Every known format, newest first
    pub const ALL: [FilenamePattern; 2] = [FilenamePattern::Current, FilenamePattern::Legacy];

    pub fn name(self) -> &'static str {
        match self {
            FilenamePattern::Legacy => "legacy",
            FilenamePattern::Current => "current",
        }
    }

    /// The regular grammar a stem must satisfy
    pub fn pattern(self) -> &'static str {
        match self {
            FilenamePattern::Legacy => filename_formats::LEGACY_PATTERN,
            FilenamePattern::Current => filename_formats::CURRENT_PATTERN,
        }
    }

    /// An example stem in this format
    pub fn example(self) -> &'static str {
        match self {
            FilenamePattern::Legacy => filename_formats::LEGACY_EXAMPLE,
            FilenamePattern::Current => filename_formats::CURRENT_EXAMPLE,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            FilenamePattern::Legacy => &LEGACY_REGEX,
            FilenamePattern::Current => &CURRENT_REGEX,
        }
    }

    /// Whether the whole stem (not a substring of it) satisfies this format
    pub fn matches(self, stem: &str) -> bool {
        self.regex()
            .find(stem)
            .is_some_and(|m| m.start() == 0 && m.end() == stem.len())
    }

    /// Find the single format among `patterns` that matches `stem`
    pub fn classify(stem: &str, patterns: &[FilenamePattern]) -> Option<FilenamePattern> {
        patterns.iter().copied().find(|pattern| pattern.matches(stem))
    }

    /// Whether this format carries a value for `field`
    pub fn supports(self, field: SeriesField) -> bool {
        !matches!(
            (self, field),
            (FilenamePattern::Legacy, SeriesField::Cruise)
        )
    }

    /// Extract a field from a stem already known to match this format
    ///
    /// Extraction is positional over the underscore separated tokens. Fields the
    /// format does not carry, and stems with the wrong token count, yield `None`.
    pub fn extract(self, stem: &str, field: SeriesField) -> Option<String> {
        if !self.supports(field) {
            return None;
        }

        let tokens: Vec<&str> = stem.split(STEM_SEPARATOR).collect();
        if tokens.len() != TOKEN_COUNT {
            return None;
        }

        let value = match field {
            SeriesField::Instrument => tokens[0].to_string(),
            SeriesField::InstrumentSerial => tokens[1].to_string(),
            SeriesField::Date => tokens[2].to_string(),
            SeriesField::Time => tokens[3].to_string(),
            SeriesField::Year => tokens[2].get(..4)?.to_string(),
            SeriesField::Serno => tokens[TOKEN_COUNT - 1].to_string(),
            SeriesField::Country => match self {
                FilenamePattern::Current => tokens[4].get(..2)?.to_string(),
                FilenamePattern::Legacy => tokens[4].to_string(),
            },
            SeriesField::Ship => match self {
                FilenamePattern::Current => tokens[4].to_string(),
                FilenamePattern::Legacy => format!("{}{}", tokens[4], tokens[5]),
            },
            SeriesField::Cruise => tokens[5].to_string(),
        };

        Some(value)
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern: {}\nExample: {}", self.pattern(), self.example())
    }
}
