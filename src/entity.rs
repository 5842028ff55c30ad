//! # Geometric Value Types
//!
//! Plain records shared by the geometry engine, the component tree and the
//! providers. All units are millimeters.

use serde::{Deserialize, Serialize};

/// Natural size of a piece of content (an image's pixel aspect, a code symbol's
/// square, a barcode's proportion).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height over width.
    #[inline]
    pub fn proportion(&self) -> f64 {
        self.height / self.width
    }

    /// Both sides strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A placement rectangle: position plus size.
///
/// Cells produced by the geometry engine are relative to the outer cell they
/// were fitted into; [`Cell::offset`] turns them into absolute page cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Cell {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The size of this cell, without its position.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Translate this cell by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Cell {
        Cell::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    Png,
    Jpeg,
}

impl Extension {
    /// Guess from a file name's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Extension::Png),
            "jpg" | "jpeg" => Some(Extension::Jpeg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Extension::Png => "png",
            Extension::Jpeg => "jpg",
        }
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            Extension::Png => image::ImageFormat::Png,
            Extension::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}
