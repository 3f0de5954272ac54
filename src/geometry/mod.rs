//! Geometric primitives for layout analysis.
//!
//! Page coordinates have their origin at the top-left corner with y growing
//! downward, matching the text model produced by the document adapter.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates.
///
/// Stored as two corners `(x0, y0)` (top-left) and `(x1, y1)` (bottom-right).
/// A well-formed box has `x0 <= x1` and `y0 <= y1`; see [`BoundingBox::is_valid`].
///
/// Serializes as the four-element array `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a bounding box from an origin and dimensions.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// A band spanning `x0..x1` horizontally and `0..height` vertically.
    ///
    /// Column classification measures a line's overlap against the band
    /// carved out of the page below and above a column header.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_oxide::geometry::BoundingBox;
    ///
    /// let header = BoundingBox::new(40.0, 300.0, 60.0, 310.0);
    /// let band = BoundingBox::vertical_band(&header, 792.0);
    /// assert_eq!(band, BoundingBox::new(40.0, 0.0, 60.0, 792.0));
    /// ```
    pub fn vertical_band(header: &BoundingBox, height: f32) -> Self {
        Self::new(header.x0, 0.0, header.x1, height)
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Area of the box. Zero for degenerate or inverted boxes.
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// Whether the corners are ordered (`x0 <= x1`, `y0 <= y1`) and finite.
    pub fn is_valid(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }

    /// Whether the box encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.x0 < self.x1 && self.y0 < self.y1)
    }

    /// Intersection of two boxes, or `None` when they share no area.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_oxide::geometry::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    /// let b = BoundingBox::new(50.0, 50.0, 150.0, 150.0);
    /// assert_eq!(a.intersect(&b), Some(BoundingBox::new(50.0, 50.0, 100.0, 100.0)));
    ///
    /// let far = BoundingBox::new(200.0, 200.0, 300.0, 300.0);
    /// assert_eq!(a.intersect(&far), None);
    /// ```
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let clipped = BoundingBox::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }

    /// Area shared by two boxes (zero if disjoint or merely touching).
    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        self.intersect(other).map_or(0.0, |b| b.area())
    }

    /// Whether the two boxes share a positive area.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.intersect(other).is_some()
    }

    /// Whether `other` lies entirely within this box (edges inclusive).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Union of every box in `boxes`, or `None` if the iterator is empty.
    pub fn enclosing<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Option<BoundingBox> {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(acc) => Some(acc.union(b)),
        })
    }

    /// Vertical overlap between two boxes (negative when separated).
    pub fn vertical_overlap(&self, other: &BoundingBox) -> f32 {
        self.y1.min(other.y1) - self.y0.max(other.y0)
    }

    /// Horizontal overlap between two boxes (negative when separated).
    pub fn horizontal_overlap(&self, other: &BoundingBox) -> f32 {
        self.x1.min(other.x1) - self.x0.max(other.x0)
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}
