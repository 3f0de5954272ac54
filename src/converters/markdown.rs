//! Markdown rendering of parsed reports.
//!
//! Metadata is written as bullet lists; results as one pipe table per panel
//! in the order panels first appear in the report.

use crate::converters::whitespace::normalize_cell;
use crate::pipeline::report::{LabReport, ParsedRow};

/// Columns of the per-panel tables. The panel itself is the table heading.
const TABLE_COLUMNS: [&str; 7] = [
    "Test",
    "Current Result",
    "Flag",
    "Previous Result",
    "Date",
    "Units",
    "Reference Interval",
];

/// Converter for lab reports to Markdown.
///
/// # Examples
///
/// ```
/// use lab_oxide::converters::MarkdownConverter;
/// use lab_oxide::pipeline::{LabReport, ParsedRow};
///
/// let report = LabReport {
///     rows: vec![ParsedRow {
///         test: "WBC".to_string(),
///         panel: "CBC".to_string(),
///         current_result: "6.1".to_string(),
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
/// let markdown = MarkdownConverter::new().convert(&report);
/// assert!(markdown.contains("## CBC"));
/// assert!(markdown.contains("| WBC | 6.1 |"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    title: Option<String>,
}

impl MarkdownConverter {
    /// Create a new Markdown converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a top-level heading above the report.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render a report.
    pub fn convert(&self, report: &LabReport) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("# {}\n\n", normalize_cell(title)));
        }

        out.push_str("## Subject\n\n");
        let (last, first) = &report.subject.name;
        let name = normalize_cell(&format!("{} {}", last, first));
        if !name.is_empty() {
            out.push_str(&format!("- **Name**: {}\n", escape_markdown(&name)));
        }
        for (key, value) in &report.subject.fields {
            out.push_str(&format!("- **{}**: {}\n", key, escape_markdown(value)));
        }

        out.push_str("\n## Sample\n\n");
        for (key, value) in &report.sample.fields {
            out.push_str(&format!("- **{}**: {}\n", key, escape_markdown(value)));
        }

        for panel in report.panels() {
            out.push_str(&format!("\n## {}\n\n", normalize_cell(panel)));
            out.push_str(&format!("| {} |\n", TABLE_COLUMNS.join(" | ")));
            out.push_str(&format!("|{}\n", "---|".repeat(TABLE_COLUMNS.len())));
            for row in report.panel(panel) {
                out.push_str(&table_row(row));
            }
        }
        out
    }
}

fn table_row(row: &ParsedRow) -> String {
    let cells = [
        &row.test,
        &row.current_result,
        &row.flag,
        &row.previous_result,
        &row.date,
        &row.units,
        &row.reference_interval,
    ];
    let cells: Vec<String> = cells
        .iter()
        .map(|c| escape_markdown(&normalize_cell(c)))
        .collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Escape characters that would break a table cell.
pub fn escape_markdown(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(panel: &str, test: &str, interval: &str) -> ParsedRow {
        ParsedRow {
            test: test.to_string(),
            panel: panel.to_string(),
            reference_interval: interval.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_table_per_panel() {
        let report = LabReport {
            rows: vec![row("CBC", "WBC", "3.4-10.8"), row("CMP", "Glucose", "70-99"), row("CBC", "RBC", "")],
            ..Default::default()
        };
        let md = MarkdownConverter::new().convert(&report);
        let cbc = md.find("## CBC").unwrap();
        let cmp = md.find("## CMP").unwrap();
        assert!(cbc < cmp);
        // Both CBC rows land in the CBC table
        let rbc = md.find("| RBC |").unwrap();
        assert!(rbc > cbc && rbc < cmp);
        assert_eq!(md.matches("| Test | Current Result |").count(), 2);
    }

    #[test]
    fn test_pipes_are_escaped() {
        let report = LabReport {
            rows: vec![row("UA", "pH | dip", "5.0-8.0")],
            ..Default::default()
        };
        let md = MarkdownConverter::new().convert(&report);
        assert!(md.contains("pH \\| dip"));
    }

    #[test]
    fn test_metadata_bullets() {
        let mut report = LabReport::default();
        report.subject.name = ("DOE, JANE".to_string(), "Patient Report".to_string());
        report.subject.fields.insert("DOB".to_string(), "01/02/1980".to_string());
        report.sample.fields.insert("Fasting".to_string(), "Yes".to_string());
        let md = MarkdownConverter::new().with_title("Lab Report").convert(&report);
        assert!(md.starts_with("# Lab Report\n"));
        assert!(md.contains("- **Name**: DOE, JANE Patient Report\n"));
        assert!(md.contains("- **DOB**: 01/02/1980\n"));
        assert!(md.contains("- **Fasting**: Yes\n"));
    }
}
