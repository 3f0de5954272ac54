//! CSV rendering of parsed rows (RFC 4180).

use crate::error::{Error, Result};
use crate::pipeline::report::{LabReport, PARSED_ROW_FIELDS};
use ::csv::{Terminator, WriterBuilder};

/// Render the result rows as CSV with a header row.
///
/// Records end in CRLF. Fields holding a comma, a quote or a line break are
/// quoted, with embedded quotes doubled.
pub fn to_csv(report: &LabReport) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(PARSED_ROW_FIELDS)?;
    for row in &report.rows {
        writer.write_record(row.values())?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
