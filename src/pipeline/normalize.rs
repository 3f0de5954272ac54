//! Row normalization: raw rows → flat result records.
//!
//! Two header cells cover two values each. "Current Result and Flag" holds a
//! result and an optional flag; "Previous Result and Date" holds either
//! nothing or a result with its date. The fragment count tells which values
//! are present.

use crate::config::{
    COLUMN_CURRENT_RESULT_AND_FLAG, COLUMN_PREVIOUS_RESULT_AND_DATE, COLUMN_REFERENCE_INTERVAL,
    COLUMN_TEST, COLUMN_UNITS,
};
use crate::error::{Error, Result};
use crate::pipeline::report::ParsedRow;
use crate::pipeline::table::{RawRow, SectionTables};

/// Shape of a compound column's fragment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundSplit {
    /// No fragments
    Empty,
    /// One fragment
    Single(String),
    /// Two fragments
    Pair(String, String),
    /// Any other count
    Invalid(Vec<String>),
}

impl CompoundSplit {
    /// Classify a fragment list by its length.
    pub fn from_fragments(fragments: Vec<String>) -> Self {
        let mut iter = fragments.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (None, _, _) => CompoundSplit::Empty,
            (Some(first), None, _) => CompoundSplit::Single(first),
            (Some(first), Some(second), None) => CompoundSplit::Pair(first, second),
            (Some(first), Some(second), Some(third)) => {
                let mut all = vec![first, second, third];
                all.extend(iter);
                CompoundSplit::Invalid(all)
            },
        }
    }
}

/// Split "Current Result and Flag" into `(result, flag)`.
///
/// Zero, one or two fragments are accepted; a missing flag is `""`.
pub fn split_current_result(fragments: Vec<String>) -> std::result::Result<(String, String), Vec<String>> {
    match CompoundSplit::from_fragments(fragments) {
        CompoundSplit::Empty => Ok((String::new(), String::new())),
        CompoundSplit::Single(result) => Ok((result, String::new())),
        CompoundSplit::Pair(result, flag) => Ok((result, flag)),
        CompoundSplit::Invalid(fragments) => Err(fragments),
    }
}

/// Split "Previous Result and Date" into `(result, date)`.
///
/// Only zero or two fragments are accepted: a previous result always comes
/// with its date.
pub fn split_previous_result(fragments: Vec<String>) -> std::result::Result<(String, String), Vec<String>> {
    match CompoundSplit::from_fragments(fragments) {
        CompoundSplit::Empty => Ok((String::new(), String::new())),
        CompoundSplit::Pair(result, date) => Ok((result, date)),
        CompoundSplit::Single(result) => Err(vec![result]),
        CompoundSplit::Invalid(fragments) => Err(fragments),
    }
}

/// Whether a row's test name contains any skip term (case-insensitive).
///
/// Test fragments are concatenated without separators before matching.
pub fn is_skipped(row: &RawRow, skip_terms: &[String]) -> bool {
    let test = row.fragments(COLUMN_TEST).concat().to_lowercase();
    skip_terms
        .iter()
        .any(|term| test.contains(term.to_lowercase().as_str()))
}

/// Normalize one raw row belonging to `section`.
///
/// # Errors
///
/// [`Error::SchemaViolation`] when a compound column has an unexpected
/// number of fragments.
pub fn normalize_row(section: &str, mut row: RawRow) -> Result<ParsedRow> {
    let (current_result, flag) = split_current_result(row.take(COLUMN_CURRENT_RESULT_AND_FLAG))
        .map_err(|fragments| violation(COLUMN_CURRENT_RESULT_AND_FLAG, section, &row, &fragments))?;
    let (previous_result, date) = split_previous_result(row.take(COLUMN_PREVIOUS_RESULT_AND_DATE))
        .map_err(|fragments| violation(COLUMN_PREVIOUS_RESULT_AND_DATE, section, &row, &fragments))?;

    Ok(ParsedRow {
        test: row.joined(COLUMN_TEST),
        panel: section.to_string(),
        current_result,
        flag,
        previous_result,
        date,
        units: row.joined(COLUMN_UNITS),
        reference_interval: row.joined(COLUMN_REFERENCE_INTERVAL),
    })
}

fn violation(column: &str, section: &str, row: &RawRow, fragments: &[String]) -> Error {
    let rendered: Vec<String> = row
        .iter()
        .map(|(name, values)| format!("{:?}: {:?}", name, values))
        .collect();
    Error::SchemaViolation {
        column: column.to_string(),
        section: section.to_string(),
        row: format!("{{{}}} with {:?} = {:?}", rendered.join(", "), column, fragments),
    }
}

/// Normalize every section's rows, dropping rows whose test matches a skip term.
///
/// Output follows section order, then row order within a section.
pub fn normalize_tables(tables: SectionTables, skip_terms: &[String]) -> Result<Vec<ParsedRow>> {
    let mut parsed = vec![];
    for (section, rows) in tables {
        for row in rows {
            if is_skipped(&row, skip_terms) {
                log::trace!("Skipping row {:?} in {}", row.joined(COLUMN_TEST), section);
                continue;
            }
            parsed.push(normalize_row(&section, row)?);
        }
    }
    Ok(parsed)
}
