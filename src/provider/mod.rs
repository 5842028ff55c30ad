//! # Drawing Providers
//!
//! The render pass resolves every component to an absolute [`Cell`] and hands
//! it to a [`Provider`], which owns the actual drawing. The layout core never
//! encodes symbols, measures fonts or writes files itself.
//!
//! | Provider | Output |
//! |----------|--------|
//! | [`RecordingProvider`] | list of calls with their cells (tests, `folio layout`) |
//! | [`PreviewProvider`] | one grayscale PNG per page |

mod preview;
mod recording;

pub use preview::PreviewProvider;
pub use recording::{ProviderCall, RecordingProvider};

use crate::entity::{Cell, Extension};
use crate::error::FolioError;
use crate::props::{BarcodeProp, CellStyle, LineProp, Rect, TextProp};

/// Drawing capability consumed by the render pass.
///
/// Every cell is absolute, in millimeters from the page's top-left corner.
/// Errors are returned unchanged to the caller of the render pass.
pub trait Provider {
    /// Start page `index` (zero-based). Subsequent calls draw onto it.
    fn add_page(&mut self, index: usize) -> Result<(), FolioError>;

    fn add_text(&mut self, text: &str, cell: Cell, prop: &TextProp) -> Result<(), FolioError>;

    /// `cell` is already fitted to the image's aspect ratio.
    fn add_image(&mut self, bytes: &[u8], extension: Extension, cell: Cell) -> Result<(), FolioError>;

    /// `cell` is the square the symbol occupies.
    fn add_qr_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError>;

    /// `cell` is the square the symbol occupies.
    fn add_matrix_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError>;

    /// `cell` is fitted to the barcode proportion.
    fn add_bar_code(&mut self, code: &str, cell: Cell, prop: &BarcodeProp) -> Result<(), FolioError>;

    /// `cell` is the rectangle covered by the stroke.
    fn add_line(&mut self, cell: Cell, prop: &LineProp) -> Result<(), FolioError>;

    /// Background and border of a styled row or column, drawn before its
    /// content.
    fn add_cell_style(&mut self, cell: Cell, style: &CellStyle) -> Result<(), FolioError>;

    /// Outline drawn around every column in debug mode.
    fn add_debug_border(&mut self, cell: Cell) -> Result<(), FolioError> {
        let _ = cell;
        Ok(())
    }
}

impl<P: Provider + ?Sized> Provider for &mut P {
    fn add_page(&mut self, index: usize) -> Result<(), FolioError> {
        (**self).add_page(index)
    }

    fn add_text(&mut self, text: &str, cell: Cell, prop: &TextProp) -> Result<(), FolioError> {
        (**self).add_text(text, cell, prop)
    }

    fn add_image(&mut self, bytes: &[u8], extension: Extension, cell: Cell) -> Result<(), FolioError> {
        (**self).add_image(bytes, extension, cell)
    }

    fn add_qr_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError> {
        (**self).add_qr_code(code, cell, prop)
    }

    fn add_matrix_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError> {
        (**self).add_matrix_code(code, cell, prop)
    }

    fn add_bar_code(&mut self, code: &str, cell: Cell, prop: &BarcodeProp) -> Result<(), FolioError> {
        (**self).add_bar_code(code, cell, prop)
    }

    fn add_line(&mut self, cell: Cell, prop: &LineProp) -> Result<(), FolioError> {
        (**self).add_line(cell, prop)
    }

    fn add_cell_style(&mut self, cell: Cell, style: &CellStyle) -> Result<(), FolioError> {
        (**self).add_cell_style(cell, style)
    }

    fn add_debug_border(&mut self, cell: Cell) -> Result<(), FolioError> {
        (**self).add_debug_border(cell)
    }
}
