//! Table assembly: section blocks → raw rows.
//!
//! Every block the section walk yields is one physical table row. Each of its
//! body-font lines is filed under the column its box overlaps most, giving a
//! [`RawRow`] of text fragments per column.

use crate::config::{ParserConfig, COLUMN_REFERENCE_INTERVAL};
use crate::document::LabDocument;
use crate::error::Result;
use crate::extractors::anchors::{locate_headers, locate_ordered_items};
use crate::extractors::sections::stream_sections_from;
use crate::geometry::BoundingBox;
use crate::layout::column_classifier::HeaderMap;
use crate::layout::text_block::TextBlock;
use indexmap::IndexMap;

/// Raw rows per section, in order of first appearance.
pub type SectionTables = IndexMap<String, Vec<RawRow>>;

/// One physical table row: text fragments per column, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    columns: IndexMap<String, Vec<String>>,
}

impl RawRow {
    /// Create a row with an empty fragment list for every label.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: labels.into_iter().map(|l| (l.to_string(), vec![])).collect(),
        }
    }

    /// Append a fragment to a column.
    ///
    /// Once the reference interval column holds text, the row is locked to
    /// it: fragments for any other column are refused and `false` is
    /// returned. Interval text often wraps onto words that would otherwise
    /// land in a neighbouring column.
    pub fn push(&mut self, column: &str, fragment: impl Into<String>) -> bool {
        if column != COLUMN_REFERENCE_INTERVAL && !self.fragments(COLUMN_REFERENCE_INTERVAL).is_empty() {
            return false;
        }
        self.columns
            .entry(column.to_string())
            .or_default()
            .push(fragment.into());
        true
    }

    /// Fragments of a column (empty if the column is unknown).
    pub fn fragments(&self, column: &str) -> &[String] {
        match self.columns.get(column) {
            Some(fragments) => fragments,
            None => &[],
        }
    }

    /// Remove a column, returning its fragments.
    pub fn take(&mut self, column: &str) -> Vec<String> {
        self.columns.shift_remove(column).unwrap_or_default()
    }

    /// Fragments of a column joined with single spaces.
    pub fn joined(&self, column: &str) -> String {
        self.fragments(column).join(" ")
    }

    /// Whether no column holds any fragment.
    pub fn is_blank(&self) -> bool {
        self.columns.values().all(Vec::is_empty)
    }

    /// Columns and fragments in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Classify one block's lines into a raw row.
///
/// Lines are skipped when their first span is blank, starts with a space, or
/// is not in the body font. Returns `None` for a row that ends up blank.
pub fn assemble_row(
    block: &TextBlock,
    headers: &HeaderMap,
    page_height: f32,
    config: &ParserConfig,
) -> Option<RawRow> {
    let mut row = RawRow::new(headers.labels());

    for line in &block.lines {
        let Some(span) = line.first_span() else {
            continue;
        };
        if span.text.trim().is_empty() || span.text.starts_with(' ') || !config.is_body_font(span.size) {
            log::trace!("Skipping line {:?} (size {})", span.text, span.size);
            continue;
        }

        let Some(column) = headers.classify(&span.bbox, page_height) else {
            continue;
        };
        if !row.push(column, span.text.as_str()) {
            log::trace!("Dropping {:?} for {} after reference interval", span.text, column);
        }
    }

    (!row.is_blank()).then_some(row)
}

/// Walk every page and gather raw rows per section.
///
/// Anchors are located on the anchor page. That page is clipped to the band
/// below the "Ordered Items" block; other pages are walked whole. Section
/// state carries from one page to the next.
///
/// # Errors
///
/// [`crate::Error::InvalidConfig`] if the header labels do not name the five
/// columns, [`crate::Error::NotFound`] if either anchor is missing, and
/// [`crate::Error::PageOutOfRange`] if the anchor page does not exist.
pub fn extract_tables(doc: &LabDocument, config: &ParserConfig) -> Result<SectionTables> {
    config.validate()?;
    let anchor = doc.page(config.anchor_page)?;
    let (sections, items_bbox) = locate_ordered_items(anchor, config)?;
    let headers = locate_headers(anchor, config.header_labels.as_slice())?;

    let mut tables = SectionTables::new();
    let mut current: Option<String> = None;

    for page in doc.pages() {
        let clip = (page.number == config.anchor_page)
            .then(|| BoundingBox::new(items_bbox.x0, items_bbox.y1, items_bbox.x1, page.height));

        let mut walk = stream_sections_from(page, &sections, config, clip.as_ref(), current.take());
        let mut page_rows = 0;
        for (section, block) in walk.by_ref() {
            if let Some(row) = assemble_row(&block, &headers, page.height, config) {
                tables.entry(section).or_default().push(row);
                page_rows += 1;
            }
        }
        current = walk.into_current_section();
        log::debug!("Page {}: {} rows", page.number, page_rows);
    }

    for name in sections.names() {
        if !tables.contains_key(name) {
            log::warn!("Ordered item '{}' produced no rows", name);
        }
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COLUMN_TEST, COLUMN_UNITS, DEFAULT_HEADER_LABELS};
    use crate::layout::text_block::{TextLine, TextSpan};

    fn headers() -> HeaderMap {
        DEFAULT_HEADER_LABELS
            .iter()
            .zip([(40.0, 150.0), (200.0, 300.0), (320.0, 420.0), (440.0, 480.0), (500.0, 580.0)])
            .map(|(label, (x0, x1))| (label.to_string(), BoundingBox::new(x0, 250.0, x1, 260.0)))
            .collect()
    }

    fn line(text: &str, x0: f32, x1: f32, size: f32) -> TextLine {
        TextLine::new(vec![TextSpan::new(text, BoundingBox::new(x0, 400.0, x1, 409.0), size)])
    }

    #[test]
    fn test_raw_row_reference_interval_lock() {
        let mut row = RawRow::new(DEFAULT_HEADER_LABELS);
        assert!(row.push(COLUMN_TEST, "WBC"));
        assert!(row.push(COLUMN_REFERENCE_INTERVAL, "3.8-"));
        assert!(!row.push(COLUMN_UNITS, "10.5"));
        assert!(row.push(COLUMN_REFERENCE_INTERVAL, "10.5"));
        assert_eq!(row.joined(COLUMN_REFERENCE_INTERVAL), "3.8- 10.5");
        assert!(row.fragments(COLUMN_UNITS).is_empty());
    }

    #[test]
    fn test_raw_row_blank_and_take() {
        let mut row = RawRow::new(DEFAULT_HEADER_LABELS);
        assert!(row.is_blank());
        row.push(COLUMN_UNITS, "mg/dL");
        assert!(!row.is_blank());
        assert_eq!(row.take(COLUMN_UNITS), vec!["mg/dL".to_string()]);
        assert!(row.take(COLUMN_UNITS).is_empty());
        assert_eq!(row.iter().count(), 4);
    }

    #[test]
    fn test_assemble_row_classifies_lines() {
        let block = TextBlock::new(vec![
            line("WBC", 40.0, 60.0, 9.0),
            line("6.1", 210.0, 225.0, 9.0),
            line("x10E3/uL", 440.0, 475.0, 9.0),
            line("3.4-10.8", 505.0, 540.0, 9.0),
        ]);
        let row = assemble_row(&block, &headers(), 792.0, &ParserConfig::default()).unwrap();
        assert_eq!(row.fragments(COLUMN_TEST), &["WBC"]);
        assert_eq!(row.fragments("Current Result and Flag"), &["6.1"]);
        assert_eq!(row.fragments(COLUMN_UNITS), &["x10E3/uL"]);
        assert_eq!(row.fragments(COLUMN_REFERENCE_INTERVAL), &["3.4-10.8"]);
    }

    #[test]
    fn test_assemble_row_skips_noise() {
        let block = TextBlock::new(vec![
            line("CBC", 40.0, 60.0, 11.0),
            line(" indented", 40.0, 80.0, 9.0),
            line("   ", 40.0, 60.0, 9.0),
        ]);
        assert!(assemble_row(&block, &headers(), 792.0, &ParserConfig::default()).is_none());
    }

    #[test]
    fn test_assemble_row_lock_beats_geometry() {
        let block = TextBlock::new(vec![
            line("Glucose", 40.0, 80.0, 9.0),
            line(">59", 505.0, 520.0, 9.0),
            // Sits squarely in the Units band but follows the interval
            line("mL/min", 440.0, 478.0, 9.0),
        ]);
        let row = assemble_row(&block, &headers(), 792.0, &ParserConfig::default()).unwrap();
        assert!(row.fragments(COLUMN_UNITS).is_empty());
        assert_eq!(row.fragments(COLUMN_REFERENCE_INTERVAL), &[">59"]);
    }
}
