//! Section-tagged block stream.
//!
//! Walks a page's blocks in reading order and tags each one with the most
//! recent section header seen, so that table rows can be filed under the
//! panel they belong to. The walk ends at the stop sentinel (the disclaimer
//! footer), which is the only way to stop early.
//!
//! Section state survives page breaks: sections continue across pages, and a
//! page that opens with rows before any "(Cont.)" header still belongs to the
//! section the previous page ended in. Carry it forward with
//! [`SectionBlocks::into_current_section`] and [`stream_sections_from`].

use crate::config::ParserConfig;
use crate::document::TextPage;
use crate::extractors::anchors::SectionList;
use crate::geometry::BoundingBox;
use crate::layout::text_block::{TextBlock, TextLine};

/// Lazy, single-pass iterator over `(section, block)` pairs for one page.
#[derive(Debug)]
pub struct SectionBlocks<'a> {
    blocks: std::vec::IntoIter<TextBlock>,
    sections: &'a SectionList,
    stop_text: &'a str,
    continuation_suffix: &'a str,
    current: Option<String>,
    stopped: bool,
}

/// Stream a page's blocks tagged by section, starting with no section.
pub fn stream_sections<'a>(
    page: &TextPage,
    sections: &'a SectionList,
    config: &'a ParserConfig,
    clip: Option<&BoundingBox>,
) -> SectionBlocks<'a> {
    stream_sections_from(page, sections, config, clip, None)
}

/// Stream a page's blocks tagged by section, starting from `current`.
///
/// # Examples
///
/// ```
/// use lab_oxide::config::ParserConfig;
/// use lab_oxide::document::TextPage;
/// use lab_oxide::extractors::anchors::SectionList;
/// use lab_oxide::extractors::sections::stream_sections_from;
/// use lab_oxide::geometry::BoundingBox;
/// use lab_oxide::layout::{TextBlock, TextLine, TextSpan};
///
/// let row = TextBlock::new(vec![TextLine::new(vec![TextSpan::new(
///     "WBC",
///     BoundingBox::new(40.0, 100.0, 60.0, 109.0),
///     9.0,
/// )])]);
/// let page = TextPage::new(1, 612.0, 792.0, vec![row]);
/// let sections = SectionList::new(["CBC"]);
/// let config = ParserConfig::default();
///
/// let tagged: Vec<_> =
///     stream_sections_from(&page, &sections, &config, None, Some("CBC".to_string())).collect();
/// assert_eq!(tagged.len(), 1);
/// assert_eq!(tagged[0].0, "CBC");
/// ```
pub fn stream_sections_from<'a>(
    page: &TextPage,
    sections: &'a SectionList,
    config: &'a ParserConfig,
    clip: Option<&BoundingBox>,
    current: Option<String>,
) -> SectionBlocks<'a> {
    SectionBlocks {
        blocks: page.text_dict(clip).into_iter(),
        sections,
        stop_text: &config.stop_text,
        continuation_suffix: &config.continuation_suffix,
        current,
        stopped: false,
    }
}

impl SectionBlocks<'_> {
    /// Section in effect at this point of the walk.
    pub fn current_section(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the stop sentinel has been reached.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consume the walk, keeping the section it ended in.
    pub fn into_current_section(self) -> Option<String> {
        self.current
    }

    /// Scan a block's spans for section headers and the stop sentinel.
    ///
    /// Returns the block with span-less lines removed, or `None` when the
    /// sentinel was hit (the block is discarded along with everything after).
    fn scan(&mut self, block: TextBlock) -> Option<TextBlock> {
        let mut lines: Vec<TextLine> = Vec::with_capacity(block.lines.len());
        for line in block.lines {
            for span in &line.spans {
                let text = span.text.trim();
                if let Some(name) = self.sections.match_header(text, self.continuation_suffix) {
                    self.current = Some(name.to_string());
                }
                if text == self.stop_text {
                    log::debug!("Reached stop text '{}'", self.stop_text);
                    self.stopped = true;
                    return None;
                }
            }
            if !line.spans.is_empty() {
                lines.push(line);
            }
        }
        Some(TextBlock {
            lines,
            bbox: block.bbox,
        })
    }
}

impl Iterator for SectionBlocks<'_> {
    type Item = (String, TextBlock);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.stopped {
            let block = self.blocks.next()?;
            let Some(block) = self.scan(block) else {
                return None;
            };
            if block.is_empty() {
                continue;
            }
            match &self.current {
                Some(section) => return Some((section.clone(), block)),
                None => log::trace!("Skipping block before first section: {:?}", block.text()),
            }
        }
        None
    }
}
