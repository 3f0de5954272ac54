//! Output converters for parsed lab reports.
//!
//! This module renders a [`LabReport`] in three formats:
//! - **JSON**: metadata and rows with the report's own field names
//! - **Markdown**: metadata bullets and one table per panel
//! - **CSV**: one record per result row
//!
//! # Examples
//!
//! ```no_run
//! use lab_oxide::config::ParserConfig;
//! use lab_oxide::converters::{convert, OutputFormat};
//! use lab_oxide::document::LabDocument;
//! use lab_oxide::pipeline::parse_lab_report;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = LabDocument::open("report.json")?;
//! let report = parse_lab_report(&doc, &ParserConfig::default())?;
//!
//! let format: OutputFormat = "markdown".parse()?;
//! println!("{}", convert(&report, format)?);
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod markdown;
pub mod whitespace;

pub use self::csv::to_csv;
pub use markdown::MarkdownConverter;
pub use whitespace::normalize_cell;

use crate::error::{Error, Result};
use crate::pipeline::report::LabReport;
use std::fmt;
use std::str::FromStr;

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Markdown tables
    Markdown,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(format: &str) -> Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Render a report as pretty-printed JSON.
pub fn to_json(report: &LabReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report as Markdown.
pub fn to_markdown(report: &LabReport) -> String {
    MarkdownConverter::new().convert(report)
}

/// Render a report in the given format.
pub fn convert(report: &LabReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Markdown => Ok(to_markdown(report)),
        OutputFormat::Csv => to_csv(report),
    }
}
