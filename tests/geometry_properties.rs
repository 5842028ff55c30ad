//! Property tests for the geometry engine.

use folio::entity::{Cell, Dimensions};
use folio::geometry::{
    center_correction, fit_cell, inner_anchored_cell, inner_center_cell, try_fit_cell,
};
use folio::props::Rect;
use proptest::prelude::*;

fn dimensions() -> impl Strategy<Value = Dimensions> {
    (0.5f64..1000.0, 0.5f64..1000.0).prop_map(|(width, height)| Dimensions::new(width, height))
}

fn percent() -> impl Strategy<Value = f64> {
    1.0f64..=100.0
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn assert_cell(cell: Cell, x: f64, y: f64, width: f64, height: f64) {
    assert!(
        close(cell.x, x) && close(cell.y, y) && close(cell.width, width) && close(cell.height, height),
        "expected ({x}, {y}, {width}, {height}), got {cell:?}"
    );
}

proptest! {
    #[test]
    fn inputs_are_unchanged(inner in dimensions(), outer in dimensions(), percent in percent()) {
        let (inner_before, outer_before) = (inner, outer);
        let rect = Rect::anchored(percent, 1.0, 2.0);

        let _ = inner_center_cell(inner, outer, percent);
        let _ = inner_anchored_cell(inner, outer, &rect);

        prop_assert_eq!(inner, inner_before);
        prop_assert_eq!(outer, outer_before);
        prop_assert_eq!(rect, Rect::anchored(percent, 1.0, 2.0));
    }

    #[test]
    fn centered_cell_is_symmetric(inner in dimensions(), outer in dimensions(), percent in percent()) {
        let cell = inner_center_cell(inner, outer, percent);
        prop_assert_eq!(cell.x, (outer.width - cell.width) / 2.0);
        prop_assert_eq!(cell.y, (outer.height - cell.height) / 2.0);
    }

    #[test]
    fn aspect_ratio_is_preserved(inner in dimensions(), outer in dimensions(), percent in percent()) {
        let expected = inner.height / inner.width;
        let centered = inner_center_cell(inner, outer, percent);
        let anchored = inner_anchored_cell(inner, outer, &Rect::anchored(percent, 0.0, 0.0));

        prop_assert!(close(centered.height / centered.width, expected));
        prop_assert!(close(anchored.height / anchored.width, expected));
    }

    #[test]
    fn fitted_cell_stays_inside_outer(inner in dimensions(), outer in dimensions(), percent in percent()) {
        let cell = inner_center_cell(inner, outer, percent);
        prop_assert!(cell.width <= outer.width * (1.0 + 1e-9));
        prop_assert!(cell.height <= outer.height * (1.0 + 1e-9));
        prop_assert!(cell.x >= -1e-9 && cell.y >= -1e-9);
    }

    #[test]
    fn larger_percent_gives_larger_cell(
        inner in dimensions(),
        outer in dimensions(),
        low in 1.0f64..50.0,
        step in 1.0f64..50.0,
    ) {
        let small = inner_center_cell(inner, outer, low);
        let large = inner_center_cell(inner, outer, low + step);
        prop_assert!(large.width > small.width);
        prop_assert!(large.height > small.height);
    }

    #[test]
    fn anchored_cell_keeps_offsets(
        inner in dimensions(),
        outer in dimensions(),
        percent in percent(),
        top in 0.0f64..500.0,
        left in 0.0f64..500.0,
    ) {
        let rect = Rect::anchored(percent, top, left);
        let cell = inner_anchored_cell(inner, outer, &rect);
        prop_assert_eq!(cell.x, left);
        prop_assert_eq!(cell.y, top);
    }

    #[test]
    fn fit_cell_dispatches_on_center(inner in dimensions(), outer in dimensions(), percent in percent()) {
        prop_assert_eq!(
            fit_cell(inner, outer, &Rect::centered(percent)),
            inner_center_cell(inner, outer, percent)
        );
        let rect = Rect::anchored(percent, 3.0, 4.0);
        prop_assert_eq!(fit_cell(inner, outer, &rect), inner_anchored_cell(inner, outer, &rect));
    }

    #[test]
    fn degenerate_outer_is_rejected(inner in dimensions(), height in 0.5f64..100.0, width in -100.0f64..=0.0) {
        let outer = Dimensions::new(width, height);
        prop_assert!(try_fit_cell(inner, outer, &Rect::default()).is_err());
    }
}

// ============================================================================
// REFERENCE SCENARIOS
// ============================================================================

const SQUARE: Dimensions = Dimensions::new(100.0, 100.0);

#[test]
fn square_in_square_full_size() {
    assert_cell(inner_center_cell(SQUARE, SQUARE, 100.0), 0.0, 0.0, 100.0, 100.0);
}

#[test]
fn square_in_square_three_quarters() {
    assert_cell(inner_center_cell(SQUARE, SQUARE, 75.0), 12.5, 12.5, 75.0, 75.0);
}

#[test]
fn wide_inner_fills_width() {
    let inner = Dimensions::new(100.0, 80.0);
    assert_cell(inner_center_cell(inner, SQUARE, 100.0), 0.0, 10.0, 100.0, 80.0);
}

#[test]
fn tall_inner_fits_by_height() {
    let inner = Dimensions::new(80.0, 100.0);
    assert_cell(inner_center_cell(inner, SQUARE, 75.0), 20.0, 12.5, 60.0, 75.0);
}

#[test]
fn anchored_half_size() {
    let rect = Rect::anchored(50.0, 15.0, 10.0);
    assert_cell(inner_anchored_cell(SQUARE, SQUARE, &rect), 10.0, 15.0, 50.0, 50.0);
}

#[test]
fn center_correction_halves_the_gap() {
    assert_eq!(center_correction(100.0, 50.0), 25.0);
}
