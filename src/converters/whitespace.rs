//! Whitespace cleanup for rendered cells.
//!
//! Report text carries line breaks inside fields (the printed name block, wrapped
//! test names). Tabular output needs each value on one line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of whitespace, including line breaks
    static ref RE_WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// # Examples
///
/// ```
/// use lab_oxide::converters::whitespace::normalize_cell;
///
/// assert_eq!(normalize_cell("  DOE,\n JANE  "), "DOE, JANE");
/// ```
pub fn normalize_cell(text: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("a\tb\r\n\nc"), "a b c");
        assert_eq!(normalize_cell(""), "");
        assert_eq!(normalize_cell("plain"), "plain");
    }
}
