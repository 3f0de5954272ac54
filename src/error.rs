//! Error types for the lab report parser.
//!
//! This module defines all error types that can occur while loading a report
//! document and reconstructing its result tables.

/// Result type alias for lab report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during report processing.
///
/// Only layout mismatches and I/O failures are errors. Noisy content (blank
/// rows, watermark fragments, lines in the wrong font) is dropped silently by
/// the extractors and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A fixed anchor (the "Ordered Items" block or the column header row)
    /// is missing from the anchor page.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A compound column split into an unexpected number of fragments.
    #[error("Could not split \"{column}\" in section \"{section}\" from row {row}")]
    SchemaViolation {
        /// Compound column that failed to split
        column: String,
        /// Section (panel) the row belongs to
        section: String,
        /// Debug rendering of the offending row
        row: String,
    },

    /// Requested page does not exist
    #[error("Page {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page index
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// Malformed page model (e.g. inverted bounding box)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Input format not recognised
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// PDF backend failure
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration that cannot drive the parser
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "pdf")]
impl From<pdf_oxide::Error> for Error {
    fn from(err: pdf_oxide::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}
