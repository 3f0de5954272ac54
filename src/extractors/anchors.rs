//! Anchor location on the first report page.
//!
//! Two fixed landmarks give the parser its geometry:
//!
//! - the **"Ordered Items"** block, which lists the sections (panels) the
//!   report contains and marks where the result tables begin, and
//! - the **column header row**, whose label boxes define the columns.

use crate::config::ParserConfig;
use crate::document::TextPage;
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::layout::column_classifier::HeaderMap;

/// Section names listed in the "Ordered Items" block, in listed order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionList {
    names: Vec<String>,
}

impl SectionList {
    /// Create a section list from names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Section names in listed order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a span text to a section name.
    ///
    /// Matches a listed name exactly or the name followed by the continuation
    /// suffix. When several names match, the last listed one wins.
    pub fn match_header(&self, text: &str, continuation_suffix: &str) -> Option<&str> {
        self.names
            .iter()
            .rev()
            .find(|name| {
                text == name.as_str()
                    || text
                        .strip_prefix(name.as_str())
                        .is_some_and(|rest| rest == continuation_suffix)
            })
            .map(String::as_str)
    }
}

/// Find the "Ordered Items" block and split it into section names.
///
/// Scans the flat block view for the first block whose trimmed text starts
/// with the configured prefix, strips the label, splits on the separator,
/// trims each name and collapses embedded newlines to spaces.
///
/// # Errors
///
/// [`Error::NotFound`] if no block starts with the prefix.
pub fn locate_ordered_items(
    page: &TextPage,
    config: &ParserConfig,
) -> Result<(SectionList, BoundingBox)> {
    for block in page.blocks() {
        let text = block.text.trim();
        if !text.starts_with(config.ordered_items_prefix.as_str()) {
            continue;
        }

        let listing = text
            .strip_prefix(config.ordered_items_label.as_str())
            .unwrap_or(text);
        let sections = SectionList::new(
            listing
                .split(config.section_separator)
                .map(|name| name.trim().replace('\n', " ")),
        );

        log::debug!("Found {} ordered items: {:?}", sections.len(), sections.names());
        return Ok((sections, block.bbox));
    }

    Err(Error::NotFound("Could not find ordered items!".to_string()))
}

/// Find the column header row.
///
/// Looks for the block whose line texts (first span of each line) equal
/// `labels` exactly and in order, and maps each label to its line's box.
///
/// # Errors
///
/// [`Error::NotFound`] if no block matches.
pub fn locate_headers<S: AsRef<str>>(page: &TextPage, labels: &[S]) -> Result<HeaderMap> {
    for block in page.text_dict(None) {
        let matches = block.lines.len() == labels.len()
            && block
                .lines
                .iter()
                .zip(labels)
                .all(|(line, label)| line.text() == AsRef::<str>::as_ref(label));
        if !matches {
            continue;
        }

        let headers: HeaderMap = block
            .lines
            .iter()
            .map(|line| (line.text().to_string(), line.bbox))
            .collect();
        log::debug!("Found table headers: {:?}", headers);
        return Ok(headers);
    }

    let labels: Vec<&str> = labels.iter().map(|l| AsRef::<str>::as_ref(l)).collect();
    Err(Error::NotFound(format!("Could not find headers {:?}!", labels)))
}
