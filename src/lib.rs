// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # Lab Oxide
//!
//! Table reconstruction for fixed-layout clinical lab reports.
//!
//! A printed lab report has no table markup: only text runs with bounding
//! boxes and font sizes. This crate rebuilds its result tables from that
//! geometry and returns one flat record per test.
//!
//! ## Core Features
//!
//! - **Anchors**: the "Ordered Items" block names the report's sections; the
//!   column header row gives each column a horizontal band
//! - **Section Stream**: blocks tagged with the section they fall under,
//!   carried across page breaks and "(Cont.)" headings
//! - **Column Classification**: every text line goes to the column whose band
//!   it overlaps most
//! - **Normalization**: compound "result and flag" / "result and date" cells
//!   split into separate fields
//! - **Metadata**: subject and sample key/value pairs from a word scan
//! - **Output**: JSON, Markdown and CSV converters
//!
//! ## Input
//!
//! Pages are read from a JSON page model (nested blocks, lines and spans with
//! boxes in top-left coordinates). With the `pdf` feature, PDF files are read
//! directly through the `pdf_oxide` crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lab_oxide::{parse_lab_report, LabDocument, ParserConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = LabDocument::open("report.json")?;
//! let report = parse_lab_report(&doc, &ParserConfig::default())?;
//!
//! for row in &report.rows {
//!     println!("{} [{}]: {} {} ({})", row.test, row.panel, row.current_result, row.units, row.flag);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Parsing a document is all-or-nothing. A missing anchor yields
//! [`Error::NotFound`]; a compound cell with an unexpected number of
//! fragments yields [`Error::SchemaViolation`]. Noise such as blank lines,
//! watermark text or lines in a non-body font is dropped without error.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry
pub mod geometry;

// Configuration
pub mod config;

// Page model and loading
pub mod document;
#[cfg(feature = "pdf")]
pub mod pdf_backend;

// Layout analysis
pub mod layout;

// Anchor, section and metadata extraction
pub mod extractors;

// Table reconstruction
pub mod pipeline;

// Output rendering
pub mod converters;

// Re-exports
pub use config::ParserConfig;
pub use converters::OutputFormat;
pub use document::{LabDocument, TextPage};
pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use pipeline::{parse_lab_report, parse_lab_report_file, LabReport, ParsedRow};

pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// Sorting page content by coordinate can then never panic.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "lab_oxide");
    }
}
