//! Grouping positioned spans into lines and blocks.
//!
//! Sources that only report loose spans (the PDF backend, OCR output) need
//! the nested block/line/span structure rebuilt before the table walk can
//! run. Tabular reports lay each physical row out on one baseline, so:
//!
//! - spans whose vertical extents overlap form a **row band**,
//! - within a band, spans separated by a wide horizontal gap start a new
//!   [`TextLine`] (one line per table cell),
//! - each row band becomes one [`TextBlock`], and a band that sits just
//!   below the previous one in the same font and overlaps it horizontally
//!   joins that block (wrapped paragraphs and wrapped cells).

use crate::layout::text_block::{TextBlock, TextLine, TextSpan};
use crate::utils::safe_float_cmp;

/// Thresholds for span grouping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingConfig {
    /// Minimum vertical overlap, as a fraction of the shorter height, for two
    /// spans to share a row band.
    pub row_overlap_ratio: f32,
    /// Horizontal gap, as a multiple of the font size, that separates two
    /// lines (cells) within a row band.
    pub cell_gap_factor: f32,
    /// Largest vertical gap between two row bands, as a multiple of the
    /// lower band's line height, for the lower band to continue the block
    /// above it.
    pub block_gap_factor: f32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            row_overlap_ratio: 0.5,
            cell_gap_factor: 1.0,
            block_gap_factor: 0.5,
        }
    }
}

/// Cluster spans into row bands by vertical overlap.
///
/// Returns clusters of span indices. Clusters are ordered top to bottom and
/// each cluster is sorted left to right.
pub fn cluster_spans_into_rows(spans: &[TextSpan], overlap_ratio: f32) -> Vec<Vec<usize>> {
    if spans.is_empty() {
        return vec![];
    }

    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| {
        let ca = (spans[a].bbox.y0 + spans[a].bbox.y1) / 2.0;
        let cb = (spans[b].bbox.y0 + spans[b].bbox.y1) / 2.0;
        safe_float_cmp(ca, cb).then_with(|| safe_float_cmp(spans[a].bbox.x0, spans[b].bbox.x0))
    });

    let mut rows: Vec<Vec<usize>> = vec![];
    let mut band = spans[order[0]].bbox;
    let mut current = vec![order[0]];

    for &idx in &order[1..] {
        let bbox = spans[idx].bbox;
        let shorter = bbox.height().min(band.height()).max(f32::EPSILON);
        if band.vertical_overlap(&bbox) >= overlap_ratio * shorter {
            band = band.union(&bbox);
            current.push(idx);
        } else {
            rows.push(std::mem::take(&mut current));
            band = bbox;
            current.push(idx);
        }
    }
    rows.push(current);

    for row in &mut rows {
        row.sort_by(|&a, &b| safe_float_cmp(spans[a].bbox.x0, spans[b].bbox.x0));
    }
    rows
}

/// Split a left-to-right sorted row band into lines at wide horizontal gaps.
pub fn split_row_into_lines(spans: &[TextSpan], row: &[usize], gap_factor: f32) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = vec![];
    for &idx in row {
        let span = &spans[idx];
        match lines.last_mut() {
            Some(line) => {
                // Lines are never empty once pushed
                let prev = &spans[line[line.len() - 1]];
                let gap = span.bbox.x0 - prev.bbox.x1;
                if gap > gap_factor * span.size.max(prev.size) {
                    lines.push(vec![idx]);
                } else {
                    line.push(idx);
                }
            },
            None => lines.push(vec![idx]),
        }
    }
    lines
}

/// Merge consecutive blocks where the lower one continues the upper one.
///
/// A block continues the one above it when the vertical gap between them is
/// at most `gap_factor` times the height of its first line, the two overlap
/// horizontally, and the facing lines share a font size. Lines keep their
/// order; the merged block's box encloses both.
pub fn merge_wrapped_blocks(blocks: Vec<TextBlock>, gap_factor: f32) -> Vec<TextBlock> {
    let mut merged: Vec<TextBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(above) if continues_block(above, &block, gap_factor) => {
                let mut lines = std::mem::take(&mut above.lines);
                lines.extend(block.lines);
                *above = TextBlock::new(lines);
            },
            _ => merged.push(block),
        }
    }
    merged
}

fn continues_block(above: &TextBlock, below: &TextBlock, gap_factor: f32) -> bool {
    let (Some(last), Some(first)) = (above.lines.last(), below.lines.first()) else {
        return false;
    };
    let same_font = match (last.first_span(), first.first_span()) {
        (Some(a), Some(b)) => (a.size - b.size).abs() <= f32::EPSILON,
        _ => false,
    };
    let gap = below.bbox.y0 - above.bbox.y1;
    same_font
        && gap <= gap_factor * first.bbox.height()
        && above.bbox.horizontal_overlap(&below.bbox) > 0.0
}

/// Rebuild blocks from loose spans.
///
/// # Examples
///
/// ```
/// use lab_oxide::geometry::BoundingBox;
/// use lab_oxide::layout::TextSpan;
/// use lab_oxide::layout::clustering::{group_spans, GroupingConfig};
///
/// let spans = vec![
///     TextSpan::new("WBC", BoundingBox::new(40.0, 400.0, 60.0, 409.0), 9.0),
///     TextSpan::new("6.1", BoundingBox::new(200.0, 400.0, 215.0, 409.0), 9.0),
/// ];
/// let blocks = group_spans(spans, &GroupingConfig::default());
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].lines.len(), 2);
/// ```
pub fn group_spans(spans: Vec<TextSpan>, config: &GroupingConfig) -> Vec<TextBlock> {
    let rows = cluster_spans_into_rows(&spans, config.row_overlap_ratio);
    let mut blocks = Vec::with_capacity(rows.len());

    for row in &rows {
        let lines = split_row_into_lines(&spans, row, config.cell_gap_factor)
            .into_iter()
            .map(|line| TextLine::new(line.into_iter().map(|i| spans[i].clone()).collect()))
            .collect();
        blocks.push(TextBlock::new(lines));
    }
    let blocks = merge_wrapped_blocks(blocks, config.block_gap_factor);

    log::trace!("Grouped {} spans into {} blocks", spans.len(), blocks.len());
    blocks
}
