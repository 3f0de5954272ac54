//! Landmark and text extraction from report pages.
//!
//! Provides anchor location, the section-tagged block walk, and keyword/value
//! metadata scanning.

pub mod anchors;
pub mod keyvalue;
pub mod sections;

pub use anchors::{locate_headers, locate_ordered_items, SectionList};
pub use keyvalue::{extract_keyvalue, scan_words};
pub use sections::{stream_sections, stream_sections_from, SectionBlocks};
