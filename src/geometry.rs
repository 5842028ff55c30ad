//! # Geometry Engine
//!
//! Pure functions placing proportional content inside an allotted cell.
//!
//! ## Fitting
//!
//! Content keeps its aspect ratio (`height / width`). When it is relatively
//! taller than the outer cell it is fitted by height, otherwise by width, and
//! then scaled by `percent`:
//!
//! ```text
//! inner 80x100 in outer 100x100 at 75%
//!
//! ┌──────────────────┐
//! │   ┌──────────┐   │  width  = 100 / 1.25 * 0.75 = 60
//! │   │          │   │  height = 60 * 1.25         = 75
//! │   │  inner   │   │  x      = (100 - 60) / 2    = 20
//! │   │          │   │  y      = (100 - 75) / 2    = 12.5
//! │   └──────────┘   │
//! └──────────────────┘
//! ```
//!
//! Centered placement derives the position with [`center_correction`];
//! anchored placement takes it verbatim from the [`Rect`].
//!
//! Returned cells are relative to the outer cell. Inputs are taken by value and
//! never modified.

use crate::entity::{Cell, Dimensions};
use crate::error::FolioError;
use crate::props::Rect;

/// Size of `inner` scaled to fit `outer` at `percent` (0-100].
///
/// Both dimensions must be strictly positive; see [`try_fitted_size`] for the
/// checked form.
pub fn fitted_size(inner: Dimensions, outer: Dimensions, percent: f64) -> Dimensions {
    debug_assert!(inner.is_valid(), "inner dimensions must be positive");
    debug_assert!(outer.is_valid(), "outer dimensions must be positive");

    let fraction = percent / 100.0;
    let inner_proportion = inner.proportion();
    let outer_proportion = outer.proportion();

    let width = if inner_proportion > outer_proportion {
        outer.height / inner_proportion * fraction
    } else {
        outer.width * fraction
    };

    Dimensions::new(width, width * inner_proportion)
}

/// Fit `inner` inside `outer` at `percent` and center it.
pub fn inner_center_cell(inner: Dimensions, outer: Dimensions, percent: f64) -> Cell {
    let size = fitted_size(inner, outer, percent);
    Cell::new(
        center_correction(outer.width, size.width),
        center_correction(outer.height, size.height),
        size.width,
        size.height,
    )
}

/// Fit `inner` inside `outer` at `rect.percent`, positioned at
/// (`rect.left`, `rect.top`).
pub fn inner_anchored_cell(inner: Dimensions, outer: Dimensions, rect: &Rect) -> Cell {
    let size = fitted_size(inner, outer, rect.percent);
    Cell::new(rect.left, rect.top, size.width, size.height)
}

/// Offset that centers a segment of `inner_size` within one of `outer_size`.
#[inline]
pub fn center_correction(outer_size: f64, inner_size: f64) -> f64 {
    (outer_size - inner_size) / 2.0
}

/// Centered or anchored fit, depending on `rect.center`.
pub fn fit_cell(inner: Dimensions, outer: Dimensions, rect: &Rect) -> Cell {
    if rect.center {
        inner_center_cell(inner, outer, rect.percent)
    } else {
        inner_anchored_cell(inner, outer, rect)
    }
}

fn check(dimensions: Dimensions) -> Result<Dimensions, FolioError> {
    if dimensions.is_valid() {
        Ok(dimensions)
    } else {
        Err(FolioError::DegenerateDimension {
            width: dimensions.width,
            height: dimensions.height,
        })
    }
}

/// [`fitted_size`] rejecting degenerate dimensions.
pub fn try_fitted_size(
    inner: Dimensions,
    outer: Dimensions,
    percent: f64,
) -> Result<Dimensions, FolioError> {
    Ok(fitted_size(check(inner)?, check(outer)?, percent))
}

/// [`inner_center_cell`] rejecting degenerate dimensions.
pub fn try_inner_center_cell(
    inner: Dimensions,
    outer: Dimensions,
    percent: f64,
) -> Result<Cell, FolioError> {
    Ok(inner_center_cell(check(inner)?, check(outer)?, percent))
}

/// [`inner_anchored_cell`] rejecting degenerate dimensions.
pub fn try_inner_anchored_cell(
    inner: Dimensions,
    outer: Dimensions,
    rect: &Rect,
) -> Result<Cell, FolioError> {
    Ok(inner_anchored_cell(check(inner)?, check(outer)?, rect))
}

/// [`fit_cell`] rejecting degenerate dimensions.
pub fn try_fit_cell(inner: Dimensions, outer: Dimensions, rect: &Rect) -> Result<Cell, FolioError> {
    Ok(fit_cell(check(inner)?, check(outer)?, rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTER: Dimensions = Dimensions::new(100.0, 100.0);

    fn assert_cell(cell: Cell, x: f64, y: f64, width: f64, height: f64) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(cell.x, x) && close(cell.y, y) && close(cell.width, width) && close(cell.height, height),
            "expected ({x}, {y}, {width}, {height}), got {cell:?}"
        );
    }

    #[test]
    fn test_center_correction() {
        assert_eq!(center_correction(100.0, 50.0), 25.0);
        assert_eq!(center_correction(50.0, 100.0), -25.0);
    }

    #[test]
    fn test_center_cell_no_side_effect() {
        let inner = Dimensions::new(100.0, 100.0);
        let outer = Dimensions::new(100.0, 100.0);
        let _ = inner_center_cell(inner, outer, 100.0);
        assert_eq!(inner, Dimensions::new(100.0, 100.0));
        assert_eq!(outer, Dimensions::new(100.0, 100.0));
    }

    #[test]
    fn test_center_cell_same_proportion() {
        for side in [80.0, 100.0, 120.0] {
            let inner = Dimensions::new(side, side);
            assert_cell(inner_center_cell(inner, OUTER, 100.0), 0.0, 0.0, 100.0, 100.0);
            assert_cell(inner_center_cell(inner, OUTER, 75.0), 12.5, 12.5, 75.0, 75.0);
        }
    }

    #[test]
    fn test_center_cell_wider_inner() {
        for inner in [Dimensions::new(100.0, 80.0), Dimensions::new(125.0, 100.0)] {
            assert_cell(inner_center_cell(inner, OUTER, 100.0), 0.0, 10.0, 100.0, 80.0);
            assert_cell(inner_center_cell(inner, OUTER, 75.0), 12.5, 20.0, 75.0, 60.0);
        }
    }

    #[test]
    fn test_center_cell_taller_inner() {
        for inner in [Dimensions::new(80.0, 100.0), Dimensions::new(100.0, 125.0)] {
            assert_cell(inner_center_cell(inner, OUTER, 100.0), 10.0, 0.0, 80.0, 100.0);
            assert_cell(inner_center_cell(inner, OUTER, 75.0), 20.0, 12.5, 60.0, 75.0);
        }
    }

    #[test]
    fn test_anchored_top_and_left() {
        let rect = Rect::anchored(50.0, 15.0, 10.0);
        let cell = inner_anchored_cell(Dimensions::new(100.0, 100.0), OUTER, &rect);
        assert_eq!(cell, Cell::new(10.0, 15.0, 50.0, 50.0));
    }

    #[test]
    fn test_anchored_sizes() {
        let at = |percent| Rect::anchored(percent, 0.0, 0.0).make_valid();

        let square = Dimensions::new(120.0, 120.0);
        assert_cell(inner_anchored_cell(square, OUTER, &at(100.0)), 0.0, 0.0, 100.0, 100.0);
        assert_cell(inner_anchored_cell(square, OUTER, &at(75.0)), 0.0, 0.0, 75.0, 75.0);

        let wide = Dimensions::new(125.0, 100.0);
        assert_cell(inner_anchored_cell(wide, OUTER, &at(100.0)), 0.0, 0.0, 100.0, 80.0);
        assert_cell(inner_anchored_cell(wide, OUTER, &at(75.0)), 0.0, 0.0, 75.0, 60.0);

        let tall = Dimensions::new(80.0, 100.0);
        assert_cell(inner_anchored_cell(tall, OUTER, &at(100.0)), 0.0, 0.0, 80.0, 100.0);
        assert_cell(inner_anchored_cell(tall, OUTER, &at(75.0)), 0.0, 0.0, 60.0, 75.0);
    }

    #[test]
    fn test_fit_cell_dispatch() {
        let inner = Dimensions::new(100.0, 100.0);
        assert_cell(fit_cell(inner, OUTER, &Rect::centered(50.0)), 25.0, 25.0, 50.0, 50.0);
        assert_cell(
            fit_cell(inner, OUTER, &Rect::anchored(50.0, 5.0, 0.0)),
            0.0,
            5.0,
            50.0,
            50.0,
        );
    }

    #[test]
    fn test_non_square_outer() {
        // QR symbol in a wide row cell fits by height
        let cell = inner_center_cell(Dimensions::new(1.0, 1.0), Dimensions::new(90.0, 30.0), 100.0);
        assert_cell(cell, 30.0, 0.0, 30.0, 30.0);
    }

    #[test]
    fn test_degenerate_rejected() {
        let err = try_inner_center_cell(Dimensions::new(0.0, 10.0), OUTER, 100.0).unwrap_err();
        assert!(matches!(
            err,
            FolioError::DegenerateDimension { width, .. } if width == 0.0
        ));
        assert!(try_fit_cell(Dimensions::new(1.0, 1.0), Dimensions::new(10.0, 0.0), &Rect::default()).is_err());
        assert!(try_fitted_size(Dimensions::new(1.0, 1.0), OUTER, 100.0).is_ok());
    }
}
