//! Report document: the page-oriented text model the extractors read.
//!
//! A [`LabDocument`] is an owned, read-only list of [`TextPage`]s. Each page
//! exposes the three views the extractors need:
//!
//! - [`TextPage::text_dict`]: nested blocks → lines → spans, reading order,
//!   optionally clipped to a rectangle
//! - [`TextPage::blocks`]: flat `(bbox, text)` blocks in source order
//! - [`TextPage::words`]: flat `(bbox, word)` tuples in reading order
//!
//! Pages come from pre-extracted JSON (always available) or, with the `pdf`
//! feature, straight from a PDF file.
//!
//! # Example
//!
//! ```no_run
//! use lab_oxide::document::LabDocument;
//!
//! let doc = LabDocument::open("report.json")?;
//! println!("Page count: {}", doc.page_count());
//! # Ok::<(), lab_oxide::error::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::layout::clustering::{group_spans, GroupingConfig};
use crate::layout::reading_order::{sort_blocks, sort_words};
use crate::layout::text_block::{FlatBlock, TextBlock, TextLine, TextSpan, Word};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One page of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPage {
    /// Zero-based page index
    #[serde(default)]
    pub number: usize,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Text blocks in source order
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl TextPage {
    /// Create a page from already-structured blocks.
    pub fn new(number: usize, width: f32, height: f32, blocks: Vec<TextBlock>) -> Self {
        Self {
            number,
            width,
            height,
            blocks,
        }
    }

    /// Create a page from loose spans, grouping them into lines and blocks.
    pub fn from_spans(
        number: usize,
        width: f32,
        height: f32,
        spans: Vec<TextSpan>,
        config: &GroupingConfig,
    ) -> Self {
        Self::new(number, width, height, group_spans(spans, config))
    }

    /// The page rectangle.
    pub fn rect(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Nested text view in reading order.
    ///
    /// With a clip, only spans sharing a positive area with the clip survive;
    /// line and block boxes are recomputed from the survivors and emptied
    /// lines and blocks are removed.
    pub fn text_dict(&self, clip: Option<&BoundingBox>) -> Vec<TextBlock> {
        let mut blocks: Vec<TextBlock> = match clip {
            None => self.blocks.clone(),
            Some(clip) => self
                .blocks
                .iter()
                .filter_map(|block| clip_block(block, clip))
                .collect(),
        };
        sort_blocks(&mut blocks);
        blocks
    }

    /// Flat block view in source order.
    pub fn blocks(&self) -> Vec<FlatBlock> {
        self.blocks.iter().map(FlatBlock::from).collect()
    }

    /// Flat word view in reading order.
    ///
    /// Words are split within each span; two spans with no whitespace
    /// between them yield two words.
    pub fn words(&self) -> Vec<Word> {
        let mut words: Vec<Word> = self
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .flat_map(|l| l.spans.iter())
            .flat_map(TextSpan::words)
            .collect();
        sort_words(&mut words);
        words
    }

    /// Check page dimensions and every bounding box.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
        {
            return Err(Error::InvalidDocument(format!(
                "page {} has invalid size {}x{}",
                self.number, self.width, self.height
            )));
        }

        let boxes = self.blocks.iter().flat_map(|b| {
            std::iter::once(&b.bbox).chain(
                b.lines
                    .iter()
                    .flat_map(|l| std::iter::once(&l.bbox).chain(l.spans.iter().map(|s| &s.bbox))),
            )
        });
        for bbox in boxes {
            if !bbox.is_valid() {
                return Err(Error::InvalidDocument(format!(
                    "page {} has malformed bounding box {:?}",
                    self.number, bbox
                )));
            }
        }
        Ok(())
    }
}

fn clip_block(block: &TextBlock, clip: &BoundingBox) -> Option<TextBlock> {
    let lines: Vec<TextLine> = block
        .lines
        .iter()
        .filter_map(|line| {
            let spans: Vec<TextSpan> = line
                .spans
                .iter()
                .filter(|s| clip.intersects(&s.bbox))
                .cloned()
                .collect();
            (!spans.is_empty()).then(|| TextLine::new(spans))
        })
        .collect();
    (!lines.is_empty()).then(|| TextBlock::new(lines))
}

#[derive(Deserialize)]
struct DocumentJson {
    pages: Vec<TextPage>,
}

/// A report document held in memory.
///
/// The source file, if any, is read completely and closed before the
/// constructor returns; the document itself holds no handles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabDocument {
    pages: Vec<TextPage>,
}

impl LabDocument {
    /// Build a document from pages. Pages are renumbered by position.
    pub fn from_pages(mut pages: Vec<TextPage>) -> Result<Self> {
        for (idx, page) in pages.iter_mut().enumerate() {
            page.number = idx;
            page.validate()?;
        }
        Ok(Self { pages })
    }

    /// Parse a document from JSON of the form `{"pages": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: DocumentJson = serde_json::from_str(json)?;
        Self::from_pages(doc.pages)
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: DocumentJson = serde_json::from_reader(reader)?;
        Self::from_pages(doc.pages)
    }

    /// Open a document file, choosing the loader by extension.
    ///
    /// `.json` files hold pre-extracted pages. `.pdf` files need the `pdf`
    /// feature.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        log::debug!("Opening report document {}", path.display());
        match extension.as_str() {
            "json" => {
                let file = File::open(path)?;
                Self::from_reader(BufReader::new(file))
            },
            #[cfg(feature = "pdf")]
            "pdf" => crate::pdf_backend::load_pdf(path),
            #[cfg(not(feature = "pdf"))]
            "pdf" => Err(Error::UnsupportedFormat(format!(
                "{}: reading PDF files requires the `pdf` feature",
                path.display()
            ))),
            other => Err(Error::UnsupportedFormat(format!(
                "{}: unknown extension '{}'",
                path.display(),
                other
            ))),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by index.
    pub fn page(&self, index: usize) -> Result<&TextPage> {
        self.pages.get(index).ok_or(Error::PageOutOfRange {
            index,
            count: self.pages.len(),
        })
    }

    /// All pages in order.
    pub fn pages(&self) -> &[TextPage] {
        &self.pages
    }
}
