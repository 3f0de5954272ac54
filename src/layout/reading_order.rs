//! Reading order determination for layout analysis.
//!
//! Report pages are single-flow documents, so reading order is the simple
//! geometric one: top-to-bottom by bottom edge, then left-to-right.

use crate::geometry::BoundingBox;
use crate::layout::text_block::{TextBlock, Word};
use crate::utils::safe_float_cmp;
use std::cmp::Ordering;

/// Compare two boxes in reading order: bottom edge first, then left edge.
///
/// Sorting on the bottom edge keeps a tall block (a multi-line cell) from
/// jumping ahead of the single-line blocks it sits beside.
pub fn reading_order_cmp(a: &BoundingBox, b: &BoundingBox) -> Ordering {
    safe_float_cmp(a.y1, b.y1).then_with(|| safe_float_cmp(a.x0, b.x0))
}

/// Sort blocks into reading order. The sort is stable.
///
/// # Examples
///
/// ```
/// use lab_oxide::geometry::BoundingBox;
/// use lab_oxide::layout::{TextBlock, TextLine, TextSpan};
/// use lab_oxide::layout::reading_order::sort_blocks;
///
/// let block = |x: f32, y: f32| {
///     TextBlock::new(vec![TextLine::new(vec![TextSpan::new(
///         "x",
///         BoundingBox::new(x, y, x + 10.0, y + 10.0),
///         9.0,
///     )])])
/// };
/// let mut blocks = vec![block(50.0, 0.0), block(0.0, 20.0), block(0.0, 0.0)];
/// sort_blocks(&mut blocks);
/// let origins: Vec<(f32, f32)> = blocks.iter().map(|b| (b.bbox.x0, b.bbox.y0)).collect();
/// assert_eq!(origins, vec![(0.0, 0.0), (50.0, 0.0), (0.0, 20.0)]);
/// ```
pub fn sort_blocks(blocks: &mut [TextBlock]) {
    blocks.sort_by(|a, b| reading_order_cmp(&a.bbox, &b.bbox));
}

/// Sort words into reading order. The sort is stable.
pub fn sort_words(words: &mut [Word]) {
    words.sort_by(|a, b| reading_order_cmp(&a.bbox, &b.bbox));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f32, y1: f32) -> Word {
        Word {
            bbox: BoundingBox::new(x0, y1 - 10.0, x0 + 20.0, y1),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_words_sorted_top_to_bottom_left_to_right() {
        let mut words = vec![word("c", 0.0, 30.0), word("b", 40.0, 10.0), word("a", 0.0, 10.0)];
        sort_words(&mut words);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_identical_boxes() {
        let mut words = vec![word("first", 0.0, 10.0), word("second", 0.0, 10.0)];
        sort_words(&mut words);
        assert_eq!(words[0].text, "first");
        assert_eq!(words[1].text, "second");
    }

    #[test]
    fn test_cmp_uses_bottom_edge() {
        let tall = BoundingBox::new(0.0, 0.0, 10.0, 50.0);
        let short = BoundingBox::new(20.0, 30.0, 30.0, 40.0);
        assert_eq!(reading_order_cmp(&short, &tall), Ordering::Less);
    }
}
