//! Integration tests for anchor location on the first report page.

mod common;

use common::*;
use lab_oxide::config::{ParserConfig, DEFAULT_HEADER_LABELS};
use lab_oxide::error::Error;
use lab_oxide::extractors::anchors::{locate_headers, locate_ordered_items};

// ============================================================================
// Ordered Items
// ============================================================================

#[test]
fn test_ordered_items_are_trimmed() {
    let page = plain_page(0, vec![ordered_items("A; B ; C", 100.0)]);
    let (sections, bbox) = locate_ordered_items(&page, &ParserConfig::default()).unwrap();
    assert_eq!(sections.names(), &["A", "B", "C"]);
    assert_eq!(bbox.y1, 100.0 + BODY);
}

#[test]
fn test_ordered_items_collapse_newlines() {
    // Listing wraps onto a second line inside the same block
    let anchor = block(vec![
        line("Ordered Items: Comp. Metabolic Panel (14); Lipid", 36.0, 100.0, BODY),
        line("Panel; Hemoglobin A1c", 36.0, 110.0, BODY),
    ]);
    let page = plain_page(0, vec![anchor]);
    let (sections, _) = locate_ordered_items(&page, &ParserConfig::default()).unwrap();
    assert_eq!(
        sections.names(),
        &["Comp. Metabolic Panel (14)", "Lipid Panel", "Hemoglobin A1c"]
    );
}

#[test]
fn test_first_ordered_items_block_wins() {
    let page = plain_page(
        0,
        vec![
            text_block("Patient Details", 40.0, 40.0, BODY),
            ordered_items("CBC", 100.0),
            ordered_items("CMP", 200.0),
        ],
    );
    let (sections, _) = locate_ordered_items(&page, &ParserConfig::default()).unwrap();
    assert_eq!(sections.names(), &["CBC"]);
}

#[test]
fn test_missing_ordered_items() {
    let page = plain_page(0, vec![text_block("Items Ordered: CBC", 40.0, 100.0, BODY)]);
    let err = locate_ordered_items(&page, &ParserConfig::default()).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// Column headers
// ============================================================================

#[test]
fn test_headers_map_labels_to_boxes() {
    let page = plain_page(0, vec![ordered_items("CBC", 100.0), standard_header_row(130.0)]);
    let headers = locate_headers(&page, &DEFAULT_HEADER_LABELS).unwrap();
    let labels: Vec<&str> = headers.labels().collect();
    assert_eq!(labels, DEFAULT_HEADER_LABELS);

    let units = headers.get("Units").unwrap();
    assert_eq!((units.x0, units.x1), COLUMNS[UNITS]);
}

#[test]
fn test_headers_in_wrong_order_are_not_found() {
    let mut shuffled = DEFAULT_HEADER_LABELS;
    shuffled.swap(1, 2);
    let page = plain_page(0, vec![header_row(&shuffled, 130.0)]);
    let err = locate_headers(&page, &DEFAULT_HEADER_LABELS).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // Every rotation of the canonical order fails too
    for shift in 1..DEFAULT_HEADER_LABELS.len() {
        let mut rotated = DEFAULT_HEADER_LABELS;
        rotated.rotate_left(shift);
        let page = plain_page(0, vec![header_row(&rotated, 130.0)]);
        assert!(locate_headers(&page, &DEFAULT_HEADER_LABELS).is_err());
    }
}

#[test]
fn test_partial_header_row_is_not_found() {
    let page = plain_page(0, vec![header_row(&DEFAULT_HEADER_LABELS[..4], 130.0)]);
    assert!(locate_headers(&page, &DEFAULT_HEADER_LABELS).is_err());
}

#[test]
fn test_header_labels_from_config() {
    let labels = ["Analyte", "Result", "Prior", "Units", "Range"];
    let page = plain_page(0, vec![header_row(&labels, 130.0)]);
    let headers = locate_headers(&page, &labels).unwrap();
    assert_eq!(headers.len(), 5);
    assert!(headers.get("Range").is_some());
}
