#![allow(dead_code)]
//! Synthetic report pages shared by the integration tests.
//!
//! Pages are US Letter in top-left coordinates. Text is laid out with a fixed
//! advance of half the font size per character.

use lab_oxide::config::DEFAULT_HEADER_LABELS;
use lab_oxide::document::{LabDocument, TextPage};
use lab_oxide::geometry::BoundingBox;
use lab_oxide::layout::{TextBlock, TextLine, TextSpan};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const BODY: f32 = 9.0;
pub const HEADING: f32 = 11.0;
pub const SMALL: f32 = 8.0;

/// Horizontal extent of each header column, in header order.
pub const COLUMNS: [(f32, f32); 5] = [
    (40.0, 150.0),
    (200.0, 300.0),
    (320.0, 420.0),
    (440.0, 480.0),
    (500.0, 580.0),
];

pub const TEST: usize = 0;
pub const CURRENT: usize = 1;
pub const PREVIOUS: usize = 2;
pub const UNITS: usize = 3;
pub const INTERVAL: usize = 4;

pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

pub fn span(text: &str, x0: f32, y0: f32, size: f32) -> TextSpan {
    let x1 = x0 + text_width(text, size).max(1.0);
    TextSpan::new(text, BoundingBox::new(x0, y0, x1, y0 + size), size)
}

pub fn line(text: &str, x0: f32, y0: f32, size: f32) -> TextLine {
    TextLine::new(vec![span(text, x0, y0, size)])
}

pub fn block(lines: Vec<TextLine>) -> TextBlock {
    TextBlock::new(lines)
}

/// A one-line block of body text.
pub fn text_block(text: &str, x0: f32, y0: f32, size: f32) -> TextBlock {
    block(vec![line(text, x0, y0, size)])
}

/// The "Ordered Items" anchor, spanning the full table width.
pub fn ordered_items(listing: &str, y0: f32) -> TextBlock {
    let text = format!("Ordered Items: {}", listing);
    let span = TextSpan::new(
        text,
        BoundingBox::new(36.0, y0, COLUMNS[4].1, y0 + BODY),
        BODY,
    );
    block(vec![TextLine::new(vec![span])])
}

/// The column header row with the given labels over the standard columns.
pub fn header_row(labels: &[&str], y0: f32) -> TextBlock {
    let lines = labels
        .iter()
        .zip(COLUMNS)
        .map(|(label, (x0, x1))| {
            TextLine::new(vec![TextSpan::new(
                *label,
                BoundingBox::new(x0, y0, x1, y0 + SMALL),
                SMALL,
            )])
        })
        .collect();
    block(lines)
}

pub fn standard_header_row(y0: f32) -> TextBlock {
    header_row(&DEFAULT_HEADER_LABELS, y0)
}

/// A section heading ("CBC", "CMP (Cont.)") in the heading font.
pub fn section_heading(name: &str, y0: f32) -> TextBlock {
    text_block(name, COLUMNS[0].0, y0, HEADING)
}

/// A table row: one line per `(column, text)` cell, in the order given.
pub fn data_row(y0: f32, cells: &[(usize, &str)]) -> TextBlock {
    let lines = cells
        .iter()
        .map(|(column, text)| line(text, COLUMNS[*column].0 + 2.0, y0, BODY))
        .collect();
    block(lines)
}

/// Patient and sample header blocks at the top of the first page.
pub fn report_header() -> Vec<TextBlock> {
    vec![
        block(vec![line("DOE", 40.0, 30.0, 14.0), line("JANE", 40.0, 46.0, 14.0)]),
        text_block("DOB: 01/02/1980 Age: 44 Sex: Female", 40.0, 70.0, SMALL),
        text_block(
            "Date Collected: 03/04/2024 Date Received: 03/05/2024 Date Reported: 03/06/2024 Fasting: Yes",
            40.0,
            84.0,
            SMALL,
        ),
    ]
}

/// The first page: report header, anchors, then `body` blocks.
///
/// The anchor block sits at y=110 and the header row at y=130; body content
/// should start below y=150.
pub fn anchor_page(listing: &str, body: Vec<TextBlock>) -> TextPage {
    let mut blocks = report_header();
    blocks.push(ordered_items(listing, 110.0));
    blocks.push(standard_header_row(130.0));
    blocks.extend(body);
    TextPage::new(0, PAGE_WIDTH, PAGE_HEIGHT, blocks)
}

pub fn plain_page(number: usize, blocks: Vec<TextBlock>) -> TextPage {
    TextPage::new(number, PAGE_WIDTH, PAGE_HEIGHT, blocks)
}

pub fn document(pages: Vec<TextPage>) -> LabDocument {
    LabDocument::from_pages(pages).expect("valid synthetic document")
}

/// Two pages: CBC and CMP on the first, CMP continued on the second, with a
/// disclaimer footer on the second.
pub fn two_page_report() -> LabDocument {
    let first = anchor_page(
        "CBC; CMP",
        vec![
            section_heading("CBC", 160.0),
            data_row(180.0, &[(TEST, "WBC"), (CURRENT, "6.1"), (UNITS, "K/uL"), (INTERVAL, "3.8-10.5")]),
            data_row(
                195.0,
                &[
                    (TEST, "Hemoglobin"),
                    (CURRENT, "11.9"),
                    (CURRENT, "Low"),
                    (PREVIOUS, "13.0"),
                    (PREVIOUS, "01/02/2023"),
                    (UNITS, "g/dL"),
                    (INTERVAL, "12.0-15.5"),
                ],
            ),
            section_heading("CMP", 220.0),
            data_row(240.0, &[(TEST, "Glucose"), (CURRENT, "105"), (CURRENT, "High"), (UNITS, "mg/dL"), (INTERVAL, "70-99")]),
        ],
    );
    let second = plain_page(
        1,
        vec![
            data_row(60.0, &[(TEST, "Sodium"), (CURRENT, "140"), (UNITS, "mmol/L"), (INTERVAL, "134-144")]),
            data_row(75.0, &[(TEST, "Note"), (CURRENT, "See below")]),
            text_block("Disclaimer", 40.0, 700.0, BODY),
            data_row(720.0, &[(TEST, "Ghost"), (CURRENT, "1.0")]),
        ],
    );
    document(vec![first, second])
}
