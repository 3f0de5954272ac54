//! Layout analysis for report pages.
//!
//! This module provides the page text model and the geometric algorithms the
//! table walk relies on:
//! - Nested block/line/span text model with flat block and word views
//! - Reading-order sorting
//! - Span grouping into lines and row blocks
//! - Column classification against header bands

pub mod clustering;
pub mod column_classifier;
pub mod reading_order;
pub mod text_block;

// Re-export main types
pub use clustering::{group_spans, GroupingConfig};
pub use column_classifier::HeaderMap;
pub use reading_order::{sort_blocks, sort_words};
pub use text_block::{FlatBlock, TextBlock, TextLine, TextSpan, Word};
