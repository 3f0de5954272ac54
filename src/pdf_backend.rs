//! PDF file backend for [`LabDocument`].
//!
//! Spans come from `pdf_oxide`'s content-stream extractor in PDF user space
//! (origin bottom-left, y up). They are flipped into the top-left page space
//! the extractors use and regrouped into row blocks.

use crate::document::{LabDocument, TextPage};
use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::layout::clustering::GroupingConfig;
use crate::layout::text_block::TextSpan;
use pdf_oxide::PdfDocument;
use std::path::Path;

/// Load every page of a PDF into the text model.
///
/// The PDF handle is dropped before this returns, on success or error.
pub fn load_pdf(path: &Path) -> Result<LabDocument> {
    let mut pdf = PdfDocument::open(path)?;
    let page_count = pdf.page_count()?;
    let grouping = GroupingConfig::default();

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let info = pdf.get_page_info(index)?;
        let media = info.media_box;
        let top = media.y + media.height;

        let spans: Vec<TextSpan> = pdf
            .extract_spans(index)?
            .into_iter()
            .filter(|s| !s.text.is_empty())
            .map(|s| {
                let (xa, xb) = (s.bbox.x - media.x, s.bbox.x - media.x + s.bbox.width);
                let (ya, yb) = (top - s.bbox.y, top - (s.bbox.y + s.bbox.height));
                // Mirrored text matrices can produce negative extents
                TextSpan {
                    text: s.text,
                    bbox: BoundingBox::new(xa.min(xb), ya.min(yb), xa.max(xb), ya.max(yb)),
                    size: s.font_size,
                    font: s.font_name,
                }
            })
            .collect();

        log::debug!("Page {}: {} spans from {}", index, spans.len(), path.display());
        pages.push(TextPage::from_spans(index, media.width, media.height, spans, &grouping));
    }

    LabDocument::from_pages(pages)
}
