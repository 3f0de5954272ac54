//! Configuration for lab report parsing.
//!
//! Every layout constant the extractors rely on lives here so that a new
//! revision of the report template can be handled without touching code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column header labels, in the order they appear on the page.
pub const DEFAULT_HEADER_LABELS: [&str; 5] = [
    COLUMN_TEST,
    COLUMN_CURRENT_RESULT_AND_FLAG,
    COLUMN_PREVIOUS_RESULT_AND_DATE,
    COLUMN_UNITS,
    COLUMN_REFERENCE_INTERVAL,
];

/// Test name column.
pub const COLUMN_TEST: &str = "Test";
/// Compound column holding the current result and its flag.
pub const COLUMN_CURRENT_RESULT_AND_FLAG: &str = "Current Result and Flag";
/// Compound column holding the previous result and its date.
pub const COLUMN_PREVIOUS_RESULT_AND_DATE: &str = "Previous Result and Date";
/// Units column.
pub const COLUMN_UNITS: &str = "Units";
/// Reference interval column. Once a row has text here it accepts nothing else.
pub const COLUMN_REFERENCE_INTERVAL: &str = "Reference Interval";

/// Lab report parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Column header labels in document order. Also the tie-break order for
    /// column classification. Must hold each of the five column labels
    /// exactly once; see [`ParserConfig::validate`].
    pub header_labels: Vec<String>,

    /// Text a block must start with to be the "Ordered Items" anchor.
    pub ordered_items_prefix: String,

    /// Label removed from the anchor text before splitting it into sections.
    pub ordered_items_label: String,

    /// Separator between section names in the anchor block.
    pub section_separator: char,

    /// Suffix marking a section header repeated on a continuation page.
    pub continuation_suffix: String,

    /// Span text that ends the table walk.
    pub stop_text: String,

    /// Font size (points) of table body text.
    pub body_font_size: f32,

    /// Allowed deviation from `body_font_size`. Zero means exact match.
    pub font_size_tolerance: f32,

    /// Test-name substrings (case-insensitive) whose rows are dropped.
    pub skip_tests: Vec<String>,

    /// Keys scanned for subject metadata.
    pub subject_keys: Vec<String>,

    /// Keys scanned for sample metadata.
    pub sample_keys: Vec<String>,

    /// Page holding the anchors and metadata.
    pub anchor_page: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create new configuration with defaults for the observed report layout.
    pub fn new() -> Self {
        Self {
            header_labels: to_strings(&DEFAULT_HEADER_LABELS),
            ordered_items_prefix: "Ordered Items".to_string(),
            ordered_items_label: "Ordered Items:".to_string(),
            section_separator: ';',
            continuation_suffix: " (Cont.)".to_string(),
            stop_text: "Disclaimer".to_string(),
            body_font_size: 9.0,
            font_size_tolerance: 0.0,
            skip_tests: to_strings(&["Note", "Urinalysis Gross Exam"]),
            subject_keys: to_strings(&["DOB", "Age", "Sex"]),
            sample_keys: to_strings(&["Date Collected", "Date Received", "Date Reported", "Fasting"]),
            anchor_page: 0,
        }
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    ///
    /// The loaded configuration is validated before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the header labels name every column the row normalizer
    /// reads, each exactly once.
    ///
    /// Reordering the labels is allowed; renaming or dropping one is not,
    /// since rows are keyed by these labels.
    pub fn validate(&self) -> Result<()> {
        for role in DEFAULT_HEADER_LABELS {
            let count = self.header_labels.iter().filter(|l| *l == role).count();
            if count != 1 {
                return Err(Error::InvalidConfig(format!(
                    "header_labels must contain \"{}\" exactly once (found {})",
                    role, count
                )));
            }
        }
        if self.header_labels.len() != DEFAULT_HEADER_LABELS.len() {
            return Err(Error::InvalidConfig(format!(
                "header_labels must have {} entries, got {}",
                DEFAULT_HEADER_LABELS.len(),
                self.header_labels.len()
            )));
        }
        Ok(())
    }

    /// Set the table body font size.
    pub fn with_body_font_size(mut self, size: f32) -> Self {
        self.body_font_size = size;
        self
    }

    /// Set the font size tolerance.
    pub fn with_font_size_tolerance(mut self, tolerance: f32) -> Self {
        self.font_size_tolerance = tolerance;
        self
    }

    /// Set the stop sentinel.
    pub fn with_stop_text(mut self, text: impl Into<String>) -> Self {
        self.stop_text = text.into();
        self
    }

    /// Replace the skip-list.
    pub fn with_skip_tests<S: AsRef<str>>(mut self, tests: &[S]) -> Self {
        self.skip_tests = tests.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Set the anchor page index.
    pub fn with_anchor_page(mut self, page: usize) -> Self {
        self.anchor_page = page;
        self
    }

    /// Whether a span's font size counts as table body text.
    pub fn is_body_font(&self, size: f32) -> bool {
        (size - self.body_font_size).abs() <= self.font_size_tolerance
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
