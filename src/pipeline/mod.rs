//! Table reconstruction pipeline.
//!
//! ```text
//! LabDocument
//!     ↓
//! [anchors] "Ordered Items" sections + column header boxes (anchor page)
//!     ↓
//! [sections] (section, block) stream per page, clipped on the anchor page
//!     ↓
//! [table] RawRow per block, lines filed under header columns
//!     ↓
//! [normalize] ParsedRow per RawRow, compound columns split
//!     ↓
//! LabReport (+ key/value metadata)
//! ```
//!
//! Each stage only reads the document; running the pipeline twice on the
//! same document yields the same report.

pub mod normalize;
pub mod report;
pub mod table;

pub use normalize::{normalize_row, normalize_tables, CompoundSplit};
pub use report::{
    parse_lab_report, parse_lab_report_file, LabReport, ParsedRow, ReferenceBounds, SampleMetadata,
    SubjectMetadata, PARSED_ROW_FIELDS,
};
pub use table::{assemble_row, extract_tables, RawRow, SectionTables};
