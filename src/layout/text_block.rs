//! Text block representation for layout analysis.
//!
//! A page is a list of [`TextBlock`]s, each a list of [`TextLine`]s, each a
//! list of [`TextSpan`]s. This is the nested "dict" view of a page; the flat
//! [`FlatBlock`] and [`Word`] views are derived from it.

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// A run of text sharing one font, with its bounding box.
///
/// Spans are the atomic unit of extraction. The table walk never looks inside
/// a span: a span either belongs to a column or is dropped as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text string, untrimmed
    pub text: String,
    /// Bounding box of the entire span
    pub bbox: BoundingBox,
    /// Font size in points
    pub size: f32,
    /// Font name, if the source reports one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub font: String,
}

impl TextSpan {
    /// Create a span without font name information.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            size,
            font: String::new(),
        }
    }
}

/// A visual line: spans in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
    /// Bounding box of the line
    pub bbox: BoundingBox,
}

impl TextLine {
    /// Create a line whose bounding box encloses its spans.
    pub fn new(spans: Vec<TextSpan>) -> Self {
        let bbox = BoundingBox::enclosing(spans.iter().map(|s| &s.bbox)).unwrap_or_default();
        Self { spans, bbox }
    }

    /// First span of the line, which carries the line's primary text and font.
    pub fn first_span(&self) -> Option<&TextSpan> {
        self.spans.first()
    }

    /// Text of the first span, or `""` for a line with no spans.
    pub fn text(&self) -> &str {
        self.first_span().map_or("", |s| s.text.as_str())
    }

    /// All span texts concatenated.
    pub fn full_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A visual paragraph or grouping of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<TextLine>,
    /// Bounding box of the block
    pub bbox: BoundingBox,
}

impl TextBlock {
    /// Create a block whose bounding box encloses its lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        let bbox = BoundingBox::enclosing(lines.iter().map(|l| &l.bbox)).unwrap_or_default();
        Self { lines, bbox }
    }

    /// Lines joined with `'\n'`, spans within a line concatenated.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::full_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Flat view of a block: its box and joined text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatBlock {
    /// Bounding box of the block
    pub bbox: BoundingBox,
    /// Lines joined with `'\n'`
    pub text: String,
}

impl From<&TextBlock> for FlatBlock {
    fn from(block: &TextBlock) -> Self {
        Self {
            bbox: block.bbox,
            text: block.text(),
        }
    }
}

/// A single whitespace-delimited word with its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Bounding box of the word
    pub bbox: BoundingBox,
    /// The word, without surrounding whitespace
    pub text: String,
}

impl TextSpan {
    /// Split the span into words.
    ///
    /// Word boxes are interpolated from the character offset of each word
    /// within the span, which is exact for monospaced text and close enough
    /// for ordering proportional text.
    pub fn words(&self) -> Vec<Word> {
        let total = self.text.chars().count();
        if total == 0 {
            return vec![];
        }
        let char_width = self.bbox.width() / total as f32;

        let mut words = vec![];
        let mut start: Option<usize> = None;
        let mut current = String::new();
        for (idx, ch) in self.text.chars().chain(std::iter::once(' ')).enumerate() {
            if ch.is_whitespace() {
                if let Some(first) = start.take() {
                    let x0 = self.bbox.x0 + first as f32 * char_width;
                    let x1 = self.bbox.x0 + idx as f32 * char_width;
                    words.push(Word {
                        bbox: BoundingBox::new(x0, self.bbox.y0, x1, self.bbox.y1),
                        text: std::mem::take(&mut current),
                    });
                }
            } else {
                start.get_or_insert(idx);
                current.push(ch);
            }
        }
        words
    }
}
