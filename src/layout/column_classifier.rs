//! Column classification against located header boxes.
//!
//! The report has no ruling lines or cell markup, only a header row whose
//! labels sit above their columns. Each header's horizontal extent, stretched
//! over the full page height, defines that column's band; a line of text
//! belongs to the band it overlaps most.

use crate::geometry::BoundingBox;
use indexmap::IndexMap;

/// Column header labels mapped to where they were found on the anchor page.
///
/// Iteration follows insertion order, which is the order the labels appear
/// in the header row. That order is also the tie-break order for
/// [`HeaderMap::classify`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderMap {
    columns: IndexMap<String, BoundingBox>,
}

impl HeaderMap {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header box. A repeated label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, bbox: BoundingBox) {
        self.columns.insert(label.into(), bbox);
    }

    /// Box for a label.
    pub fn get(&self, label: &str) -> Option<&BoundingBox> {
        self.columns.get(label)
    }

    /// Labels in header order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Labels and boxes in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundingBox)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns are known.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Pick the column whose band overlaps `bbox` the most.
    ///
    /// Bands span each header's `x0..x1` and `0..page_height`. Ties go to the
    /// label that comes first in header order, including the all-zero case
    /// where the line overlaps no band. Returns `None` only for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_oxide::geometry::BoundingBox;
    /// use lab_oxide::layout::column_classifier::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("Test", BoundingBox::new(40.0, 300.0, 60.0, 310.0));
    /// headers.insert("Units", BoundingBox::new(400.0, 300.0, 430.0, 310.0));
    ///
    /// let line = BoundingBox::new(395.0, 500.0, 425.0, 509.0);
    /// assert_eq!(headers.classify(&line, 792.0), Some("Units"));
    /// ```
    pub fn classify(&self, bbox: &BoundingBox, page_height: f32) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for (label, header) in self.iter() {
            let area = BoundingBox::vertical_band(header, page_height).intersection_area(bbox);
            match best {
                Some((_, best_area)) if area <= best_area => {},
                _ => best = Some((label, area)),
            }
        }
        best.map(|(label, _)| label)
    }
}

impl FromIterator<(String, BoundingBox)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (String, BoundingBox)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
