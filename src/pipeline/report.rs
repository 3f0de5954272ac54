//! Parsed lab report records and the top-level parse.

use crate::config::ParserConfig;
use crate::document::LabDocument;
use crate::error::Result;
use crate::extractors::keyvalue::extract_keyvalue;
use crate::pipeline::normalize::normalize_tables;
use crate::pipeline::table::extract_tables;
use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

lazy_static! {
    static ref INTERVAL_SEPARATOR: Regex = Regex::new(r"\s*[-\u{2013}]\s*").unwrap();
}

/// Date format printed in the sample metadata.
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// One test result row. Absent values are empty strings, never missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedRow {
    /// Test name
    #[serde(rename = "Test")]
    pub test: String,
    /// Section (panel) the test was reported under
    #[serde(rename = "Panel")]
    pub panel: String,
    /// Current result value
    #[serde(rename = "Current Result")]
    pub current_result: String,
    /// Out-of-range flag (e.g. "High", "Low", "Abnormal")
    #[serde(rename = "Flag")]
    pub flag: String,
    /// Previous result value
    #[serde(rename = "Previous Result")]
    pub previous_result: String,
    /// Date of the previous result
    #[serde(rename = "Date")]
    pub date: String,
    /// Units
    #[serde(rename = "Units")]
    pub units: String,
    /// Reference interval as printed
    #[serde(rename = "Reference Interval")]
    pub reference_interval: String,
}

/// Field names of [`ParsedRow`], in output order.
pub const PARSED_ROW_FIELDS: [&str; 8] = [
    "Test",
    "Panel",
    "Current Result",
    "Flag",
    "Previous Result",
    "Date",
    "Units",
    "Reference Interval",
];

impl ParsedRow {
    /// Field values in [`PARSED_ROW_FIELDS`] order.
    pub fn values(&self) -> [&str; 8] {
        [
            &self.test,
            &self.panel,
            &self.current_result,
            &self.flag,
            &self.previous_result,
            &self.date,
            &self.units,
            &self.reference_interval,
        ]
    }

    /// Split the reference interval into its bounds.
    pub fn reference_bounds(&self) -> ReferenceBounds {
        ReferenceBounds::parse(&self.reference_interval)
    }
}

/// Low and high bounds of a printed reference interval, kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceBounds {
    /// Lower bound
    pub low: Option<String>,
    /// Upper bound
    pub high: Option<String>,
}

impl ReferenceBounds {
    /// Parse an interval such as `"3.4-10.8"`, `"<200"`, `">59"` or `"-2.0 - 2.0"`.
    ///
    /// `"<X"` has an implied lower bound of `0`; `">X"` has no upper bound.
    /// An empty interval has neither bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_oxide::pipeline::report::ReferenceBounds;
    ///
    /// let bounds = ReferenceBounds::parse("3.4-10.8");
    /// assert_eq!(bounds.low.as_deref(), Some("3.4"));
    /// assert_eq!(bounds.high.as_deref(), Some("10.8"));
    ///
    /// let below = ReferenceBounds::parse("<200");
    /// assert_eq!(below.low.as_deref(), Some("0"));
    /// assert_eq!(below.high.as_deref(), Some("200"));
    /// ```
    pub fn parse(interval: &str) -> Self {
        let interval = interval.trim();
        if interval.is_empty() {
            return Self::default();
        }
        if let Some(high) = interval.strip_prefix('<') {
            return Self {
                low: Some("0".to_string()),
                high: Some(high.trim().to_string()),
            };
        }
        if let Some(low) = interval.strip_prefix('>') {
            return Self {
                low: Some(low.trim().to_string()),
                high: None,
            };
        }

        let parts: Vec<&str> = INTERVAL_SEPARATOR.split(interval).collect();
        let negative_low = interval.starts_with(['-', '\u{2013}']);
        match parts.as_slice() {
            [sign, low, high] if negative_low => Self {
                low: Some(format!("-{}{}", sign, low)),
                high: Some(high.to_string()),
            },
            [low] => Self {
                low: Some(low.to_string()),
                high: None,
            },
            [low, high, ..] => Self {
                low: Some(low.to_string()),
                high: Some(high.to_string()),
            },
            [] => Self::default(),
        }
    }
}

/// Subject (patient) metadata: key/value pairs plus the printed name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectMetadata {
    /// Scanned key/value pairs ("DOB", "Age", "Sex"), only those found
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
    /// First block of the page split once at the first line break
    #[serde(rename = "Name")]
    pub name: (String, String),
}

impl SubjectMetadata {
    /// Value of a scanned key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Sample metadata: collection/receipt/report dates and fasting status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleMetadata {
    /// Scanned key/value pairs, only those found
    pub fields: IndexMap<String, String>,
}

impl SampleMetadata {
    /// Value of a scanned key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Collection date, if present and well-formed.
    pub fn collected_on(&self) -> Option<NaiveDate> {
        self.get("Date Collected")
            .and_then(|d| NaiveDate::parse_from_str(d, REPORT_DATE_FORMAT).ok())
    }
}

/// Everything extracted from one report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabReport {
    /// Subject metadata
    pub subject: SubjectMetadata,
    /// Sample metadata
    pub sample: SampleMetadata,
    /// Result rows in section order
    pub rows: Vec<ParsedRow>,
}

impl LabReport {
    /// Rows of one panel, in report order.
    pub fn panel<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParsedRow> + 'a {
        self.rows.iter().filter(move |r| r.panel == name)
    }

    /// Panel names in order of first appearance.
    pub fn panels(&self) -> Vec<&str> {
        let mut panels: Vec<&str> = vec![];
        for row in &self.rows {
            if !panels.contains(&row.panel.as_str()) {
                panels.push(&row.panel);
            }
        }
        panels
    }
}

/// Parse a report document into metadata and result rows.
///
/// Parsing is all-or-nothing: a missing anchor or a compound column that
/// cannot be split fails the whole document. The document is only read, so
/// repeated calls return identical reports.
///
/// # Examples
///
/// ```no_run
/// use lab_oxide::config::ParserConfig;
/// use lab_oxide::document::LabDocument;
/// use lab_oxide::pipeline::parse_lab_report;
///
/// let doc = LabDocument::open("report.json")?;
/// let report = parse_lab_report(&doc, &ParserConfig::default())?;
/// for row in &report.rows {
///     println!("{} {} {}", row.test, row.current_result, row.units);
/// }
/// # Ok::<(), lab_oxide::error::Error>(())
/// ```
pub fn parse_lab_report(doc: &LabDocument, config: &ParserConfig) -> Result<LabReport> {
    let anchor = doc.page(config.anchor_page)?;

    let name = anchor
        .blocks()
        .into_iter()
        .next()
        .map(|block| match block.text.split_once('\n') {
            Some((last, first)) => (last.to_string(), first.to_string()),
            None => (block.text, String::new()),
        })
        .unwrap_or_default();
    let subject = SubjectMetadata {
        fields: extract_keyvalue(anchor, config.subject_keys.as_slice()),
        name,
    };
    let sample = SampleMetadata {
        fields: extract_keyvalue(anchor, config.sample_keys.as_slice()),
    };

    let tables = extract_tables(doc, config)?;
    let section_count = tables.len();
    let rows = normalize_tables(tables, &config.skip_tests)?;

    log::info!(
        "Parsed report: {} pages, {} sections, {} rows",
        doc.page_count(),
        section_count,
        rows.len()
    );
    Ok(LabReport {
        subject,
        sample,
        rows,
    })
}

/// Open a document file, parse it, and release it.
pub fn parse_lab_report_file(path: impl AsRef<Path>, config: &ParserConfig) -> Result<LabReport> {
    let doc = LabDocument::open(path)?;
    parse_lab_report(&doc, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(interval: &str) -> (Option<String>, Option<String>) {
        let b = ReferenceBounds::parse(interval);
        (b.low, b.high)
    }

    fn pair(low: Option<&str>, high: Option<&str>) -> (Option<String>, Option<String>) {
        (low.map(str::to_string), high.map(str::to_string))
    }

    #[test]
    fn test_reference_bounds_forms() {
        assert_eq!(bounds("3.4-10.8"), pair(Some("3.4"), Some("10.8")));
        assert_eq!(bounds("3.4 - 10.8"), pair(Some("3.4"), Some("10.8")));
        assert_eq!(bounds("70\u{2013}99"), pair(Some("70"), Some("99")));
        assert_eq!(bounds("<200"), pair(Some("0"), Some("200")));
        assert_eq!(bounds(">59"), pair(Some("59"), None));
        assert_eq!(bounds("-2.0-2.0"), pair(Some("-2.0"), Some("2.0")));
        assert_eq!(bounds("Negative"), pair(Some("Negative"), None));
        assert_eq!(bounds(""), pair(None, None));
    }

    #[test]
    fn test_parsed_row_serializes_with_report_field_names() {
        let row = ParsedRow {
            test: "WBC".to_string(),
            panel: "CBC".to_string(),
            current_result: "6.1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        for field in PARSED_ROW_FIELDS {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["Current Result"], "6.1");
        assert_eq!(json["Flag"], "");
    }

    #[test]
    fn test_collected_on() {
        let mut sample = SampleMetadata::default();
        assert_eq!(sample.collected_on(), None);
        sample.fields.insert("Date Collected".to_string(), "03/04/2024".to_string());
        assert_eq!(sample.collected_on(), NaiveDate::from_ymd_opt(2024, 3, 4));
        sample.fields.insert("Date Collected".to_string(), "2024-03-04".to_string());
        assert_eq!(sample.collected_on(), None);
    }

    #[test]
    fn test_subject_metadata_json_shape() {
        let mut subject = SubjectMetadata::default();
        subject.fields.insert("DOB".to_string(), "01/02/1980".to_string());
        subject.name = ("DOE, JANE".to_string(), "Patient Report".to_string());
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json["DOB"], "01/02/1980");
        assert_eq!(json["Name"][0], "DOE, JANE");
    }

    #[test]
    fn test_panels_in_first_appearance_order() {
        let row = |panel: &str| ParsedRow {
            panel: panel.to_string(),
            ..Default::default()
        };
        let report = LabReport {
            rows: vec![row("CBC"), row("CMP"), row("CBC")],
            ..Default::default()
        };
        assert_eq!(report.panels(), vec!["CBC", "CMP"]);
        assert_eq!(report.panel("CBC").count(), 2);
    }
}
