//! # Golden Tests
//!
//! These tests ensure that structure export stays stable.
//!
//! Each document is built (in Rust or from a JSON fixture), sealed, and its
//! structure tree compared against `tests/golden/<name>.json`. Mismatches are
//! listed path by path before the full trees are diffed.
//!
//! ## Regenerating Golden Files
//!
//! ```bash
//! cargo test generate_golden_files -- --ignored --nocapture
//! ```

use folio::components::{Barcode, Col, Line, MatrixCode, Page, QrCode, Row, Signature, Text};
use folio::config::{ConfigBuilder, PageNumber};
use folio::document::Document;
use folio::json_api;
use folio::props::{BorderType, CellStyle, Color, LineStyle, Rect};
use folio::provider::RecordingProvider;
use folio::structure::Structure;
use pretty_assertions::assert_eq;
use std::fs;

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn build_codes_document() -> Document {
    Document::new(ConfigBuilder::new().build()).add_row(
        Row::new(40.0)
            .add(Col::new(4).add(QrCode::new("https://example.com").centered(80.0)))
            .add(Col::new(4).add(MatrixCode::new("folio").with_prop(Rect::anchored(50.0, 2.0, 3.0))))
            .add(Col::new(4).add(Barcode::new("123456"))),
    )
}

fn build_invoice_document() -> Document {
    let config = ConfigBuilder::new()
        .with_title("Invoice 2024-001")
        .with_page_number(PageNumber::default())
        .build();

    Document::new(config)
        .register_header(vec![
            Row::new(15.0)
                .add(Col::new(8).add(Text::new("ACME Corp").bold().size(16.0)))
                .add(Col::new(4).add(Text::new("Invoice").right())),
        ])
        .register_footer(vec![Text::row(8.0, "Thank you")])
        .add_row(
            Row::new(10.0)
                .add(Col::new(9).add(Text::new("Widget")))
                .add(Col::auto().add(Text::new("12.50").right())),
        )
        .add_row(Line::row(5.0))
        .add_row(
            Row::new(10.0)
                .add(Col::new(9).add(Text::new("Total").bold()))
                .add(Col::auto().add(Text::new("12.50").right().color(Color::RED))),
        )
        .add_page(Page::new().add(Signature::row(25.0, "Received by")))
}

fn build_cellstyle_document() -> Document {
    let heading = CellStyle {
        background_color: Some(Color::rgb(55, 55, 55)),
        border_type: BorderType::Full,
        border_color: Some(Color::BLACK),
        border_thickness: 0.5,
        ..Default::default()
    };
    let stripe = CellStyle {
        background_color: Some(Color::rgb(230, 230, 230)),
        ..Default::default()
    };
    let underline = CellStyle {
        border_type: BorderType::Bottom,
        line_style: LineStyle::Dashed,
        ..Default::default()
    };
    let white = Color::rgb(255, 255, 255);

    Document::new(ConfigBuilder::new().build())
        .add_row(
            Row::new(10.0)
                .with_style(heading)
                .add(Col::new(6).add(Text::new("Item").bold().color(white)))
                .add(Col::new(6).add(Text::new("Qty").bold().right().color(white))),
        )
        .add_row(
            Row::new(8.0)
                .with_style(stripe)
                .add(Col::new(6).add(Text::new("Widget")))
                .add(Col::new(6).with_style(underline).add(Text::new("2").right())),
        )
}

fn build_receipt_document() -> Document {
    json_api::load("tests/fixtures/receipt.json").unwrap()
}

fn golden_documents() -> Vec<(&'static str, Document)> {
    vec![
        ("codes", build_codes_document()),
        ("invoice", build_invoice_document()),
        ("cellstyle", build_cellstyle_document()),
        ("receipt", build_receipt_document()),
    ]
}

/// Compare a structure against its golden file
fn check_golden(name: &str, actual: &Structure) {
    let path = format!("{}/{}.json", GOLDEN_DIR, name);
    let json = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "Golden file not found: {}. Run `cargo test generate_golden_files -- --ignored` to generate.",
            path
        )
    });
    let expected = Structure::from_json(&json).unwrap();

    let diffs = actual.diff(&expected);
    for diff in &diffs {
        eprintln!("{}: {}", name, diff);
    }
    assert_eq!(actual, &expected, "{} differs from its golden file", name);
}

// ============================================================================
// GOLDEN FILE GENERATION
// ============================================================================

/// Generate all golden files.
/// Run with: cargo test generate_golden_files -- --ignored --nocapture
#[test]
#[ignore]
fn generate_golden_files() {
    fs::create_dir_all(GOLDEN_DIR).unwrap();
    for (name, doc) in golden_documents() {
        let path = format!("{}/{}.json", GOLDEN_DIR, name);
        let json = doc.seal().structure().unwrap().to_json_pretty().unwrap();
        fs::write(&path, json + "\n").unwrap();
        println!("Generated: {}", path);
    }
}

// ============================================================================
// GOLDEN TESTS
// ============================================================================

#[test]
fn test_golden_codes() {
    check_golden("codes", &build_codes_document().seal().structure().unwrap());
}

#[test]
fn test_golden_invoice() {
    check_golden("invoice", &build_invoice_document().seal().structure().unwrap());
}

#[test]
fn test_golden_cellstyle() {
    check_golden("cellstyle", &build_cellstyle_document().seal().structure().unwrap());
}

#[test]
fn test_golden_receipt_from_json() {
    check_golden("receipt", &build_receipt_document().seal().structure().unwrap());
}

#[test]
fn test_golden_stable_after_render() {
    for (name, doc) in golden_documents() {
        let doc = doc.seal();
        doc.render(&mut RecordingProvider::new()).unwrap();
        check_golden(name, &doc.structure().unwrap());
    }
}

#[test]
fn test_golden_round_trip() {
    for (name, doc) in golden_documents() {
        let structure = doc.seal().structure().unwrap();
        let json = structure.to_json_pretty().unwrap();
        assert_eq!(Structure::from_json(&json).unwrap(), structure, "{}", name);
    }
}
