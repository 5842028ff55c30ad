//! # PNG Preview Provider
//!
//! Paints a document into one grayscale image per page, showing roughly what
//! the final output would look like.
//!
//! ## Architecture
//!
//! ```text
//! SealedDocument::render → PreviewProvider → Vec<GrayImage> → PNG bytes
//!                              ↓
//!                        Per call:
//!                        - mm cell → pixel rect
//!                        - text with bitmap font
//!                        - QR codes via qrcode
//!                        - 1D barcodes via barcoders
//!                        - images decoded and resized
//! ```

mod barcode;
mod font;

use std::io::Cursor;

use image::imageops::FilterType;
use image::{GrayImage, Luma};

use super::Provider;
use crate::config::PageSize;
use crate::entity::{Cell, Extension};
use crate::error::FolioError;
use crate::props::{
    Align, BarcodeProp, CellStyle, Color, LineProp, LineStyle, Orientation, Rect, TextProp, pt_to_mm,
};

use font::GlyphSize;

const WHITE: u8 = 255;
const DEBUG_GRAY: u8 = 170;
/// Dash and gap length of dashed lines, in mm.
const DASH_MM: f64 = 2.0;

/// Cell converted to pixels, clamped to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PxRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PxRect {
    fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Raster preview of a document.
///
/// ## Example
///
/// ```
/// use folio::components::{Col, Row, Text};
/// use folio::config::Config;
/// use folio::document::Document;
/// use folio::provider::PreviewProvider;
///
/// let config = Config::default();
/// let mut preview = PreviewProvider::new(config.page_size, 72.0);
/// let doc = Document::new(config)
///     .add_row(Row::new(20.0).add(Col::auto().add(Text::new("Hello"))))
///     .seal();
/// doc.render(&mut preview).unwrap();
///
/// let pngs = preview.to_png_pages().unwrap();
/// assert_eq!(pngs.len(), 1);
/// ```
pub struct PreviewProvider {
    page_size: PageSize,
    px_per_mm: f64,
    pages: Vec<GrayImage>,
}

impl PreviewProvider {
    /// Create a preview at the given resolution. Non-positive DPI falls back to 96.
    pub fn new(page_size: PageSize, dpi: f64) -> Self {
        let dpi = if dpi.is_finite() && dpi > 0.0 { dpi } else { 96.0 };
        Self {
            page_size,
            px_per_mm: dpi / 25.4,
            pages: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[GrayImage] {
        &self.pages
    }

    /// Encode every page as PNG.
    pub fn to_png_pages(&self) -> Result<Vec<Vec<u8>>, FolioError> {
        self.pages
            .iter()
            .map(|page| -> Result<Vec<u8>, FolioError> {
                let mut png = Vec::new();
                page.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
                Ok(png)
            })
            .collect()
    }

    fn page_px(&self) -> (u32, u32) {
        (
            (self.page_size.width * self.px_per_mm).round().max(1.0) as u32,
            (self.page_size.height * self.px_per_mm).round().max(1.0) as u32,
        )
    }

    fn to_px(&self, cell: Cell) -> PxRect {
        let (w, h) = self.page_px();
        let px = |mm: f64, max: u32| (mm * self.px_per_mm).round().clamp(0.0, max as f64) as u32;
        let x0 = px(cell.x, w);
        let y0 = px(cell.y, h);
        PxRect {
            x0,
            y0,
            x1: px(cell.right(), w).max(x0),
            y1: px(cell.bottom(), h).max(y0),
        }
    }

    fn current_page(&mut self) -> Result<&mut GrayImage, FolioError> {
        self.pages
            .last_mut()
            .ok_or_else(|| FolioError::Provider("preview: drawing before add_page".into()))
    }

    fn fill(&mut self, rect: PxRect, luma: u8) -> Result<(), FolioError> {
        let page = self.current_page()?;
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                page.put_pixel(x, y, Luma([luma]));
            }
        }
        Ok(())
    }

    fn outline(&mut self, rect: PxRect, luma: u8) -> Result<(), FolioError> {
        if rect.is_empty() {
            return Ok(());
        }
        let page = self.current_page()?;
        for x in rect.x0..rect.x1 {
            page.put_pixel(x, rect.y0, Luma([luma]));
            page.put_pixel(x, rect.y1 - 1, Luma([luma]));
        }
        for y in rect.y0..rect.y1 {
            page.put_pixel(rect.x0, y, Luma([luma]));
            page.put_pixel(rect.x1 - 1, y, Luma([luma]));
        }
        Ok(())
    }

    /// Paint a `modules x modules` grid of dark/light cells scaled into `rect`.
    fn blit_modules(
        &mut self,
        rect: PxRect,
        modules: usize,
        is_dark: impl Fn(usize, usize) -> bool,
    ) -> Result<(), FolioError> {
        if rect.is_empty() || modules == 0 {
            return Ok(());
        }
        let (w, h) = (rect.width() as usize, rect.height() as usize);
        let page = self.current_page()?;
        for py in 0..h {
            for px in 0..w {
                let mx = px * modules / w;
                let my = py * modules / h;
                let luma = if is_dark(mx, my) { 0 } else { WHITE };
                page.put_pixel(rect.x0 + px as u32, rect.y0 + py as u32, Luma([luma]));
            }
        }
        Ok(())
    }
}

impl Provider for PreviewProvider {
    fn add_page(&mut self, index: usize) -> Result<(), FolioError> {
        let (w, h) = self.page_px();
        tracing::debug!(index, width = w, height = h, "preview page");
        self.pages.push(GrayImage::from_pixel(w, h, Luma([WHITE])));
        Ok(())
    }

    fn add_text(&mut self, text: &str, cell: Cell, prop: &TextProp) -> Result<(), FolioError> {
        let inner = Cell::new(
            cell.x + prop.left,
            cell.y + prop.top,
            (cell.width - prop.left - prop.right).max(0.0),
            (cell.height - prop.top).max(0.0),
        );
        let rect = self.to_px(inner);
        if rect.is_empty() {
            return Ok(());
        }

        let size = GlyphSize::for_line_height(pt_to_mm(prop.size) * self.px_per_mm);
        let glyphs = font::glyphs(text, size);
        let text_width = (glyphs.len() * size.width) as u32;
        let start_x = match prop.align {
            Align::Left => rect.x0,
            Align::Center => rect.x0 + rect.width().saturating_sub(text_width) / 2,
            Align::Right => rect.x0 + rect.width().saturating_sub(text_width),
        };
        let ink = prop.color.unwrap_or(Color::BLACK).luma();

        let page = self.current_page()?;
        for (i, glyph) in glyphs.iter().enumerate() {
            let gx = start_x + (i * size.width) as u32;
            for gy in 0..size.height {
                for col in 0..size.width {
                    let (x, y) = (gx + col as u32, rect.y0 + gy as u32);
                    if x >= rect.x1 || y >= rect.y1 {
                        continue;
                    }
                    if glyph[gy * size.width + col] == 1 {
                        page.put_pixel(x, y, Luma([ink]));
                    }
                }
            }
        }
        Ok(())
    }

    fn add_image(&mut self, bytes: &[u8], extension: Extension, cell: Cell) -> Result<(), FolioError> {
        let rect = self.to_px(cell);
        if rect.is_empty() {
            return Ok(());
        }
        let decoded = image::load_from_memory_with_format(bytes, extension.image_format())?;
        let gray = image::imageops::resize(
            &decoded.to_luma8(),
            rect.width(),
            rect.height(),
            FilterType::Triangle,
        );

        let page = self.current_page()?;
        for (x, y, pixel) in gray.enumerate_pixels() {
            page.put_pixel(rect.x0 + x, rect.y0 + y, *pixel);
        }
        Ok(())
    }

    fn add_qr_code(&mut self, code: &str, cell: Cell, _prop: &Rect) -> Result<(), FolioError> {
        let qr = qrcode::QrCode::new(code.as_bytes())
            .map_err(|e| FolioError::Provider(format!("QR code generation failed: {}", e)))?;
        let modules = qr.width();
        let rect = self.to_px(cell);
        self.blit_modules(rect, modules, |x, y| qr[(x, y)] == qrcode::Color::Dark)
    }

    fn add_matrix_code(&mut self, _code: &str, cell: Cell, _prop: &Rect) -> Result<(), FolioError> {
        // Placeholder symbol: solid L finder on the left and bottom edges,
        // alternating timing pattern on the top and right edges.
        const MODULES: usize = 16;
        let rect = self.to_px(cell);
        self.blit_modules(rect, MODULES, |x, y| {
            x == 0 || y == MODULES - 1 || (y == 0 && x % 2 == 0) || (x == MODULES - 1 && y % 2 == 1)
        })
    }

    fn add_bar_code(&mut self, code: &str, cell: Cell, prop: &BarcodeProp) -> Result<(), FolioError> {
        let bars = barcode::encode(prop.kind, code)?;
        let rect = self.to_px(cell);
        if rect.is_empty() || bars.is_empty() {
            return Ok(());
        }
        let w = rect.width() as usize;
        let page = self.current_page()?;
        for px in 0..w {
            if bars[px * bars.len() / w] {
                for y in rect.y0..rect.y1 {
                    page.put_pixel(rect.x0 + px as u32, y, Luma([0]));
                }
            }
        }
        Ok(())
    }

    fn add_line(&mut self, cell: Cell, prop: &LineProp) -> Result<(), FolioError> {
        let ink = prop.color.unwrap_or(Color::BLACK).luma();
        match prop.style {
            LineStyle::Solid => {
                let rect = self.to_px(cell);
                self.fill(rect, ink)
            }
            LineStyle::Dashed => {
                let (length, horizontal) = match prop.orientation {
                    Orientation::Horizontal => (cell.width, true),
                    Orientation::Vertical => (cell.height, false),
                };
                let mut offset = 0.0;
                while offset < length {
                    let dash = DASH_MM.min(length - offset);
                    let segment = if horizontal {
                        Cell::new(cell.x + offset, cell.y, dash, cell.height)
                    } else {
                        Cell::new(cell.x, cell.y + offset, cell.width, dash)
                    };
                    let rect = self.to_px(segment);
                    self.fill(rect, ink)?;
                    offset += DASH_MM * 2.0;
                }
                Ok(())
            }
        }
    }

    fn add_cell_style(&mut self, cell: Cell, style: &CellStyle) -> Result<(), FolioError> {
        if let Some(background) = style.background_color {
            let rect = self.to_px(cell);
            self.fill(rect, background.luma())?;
        }
        for edge in style.border_cells(cell) {
            let orientation = if edge.width >= edge.height {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let prop = LineProp {
                color: style.border_color,
                style: style.line_style,
                thickness: style.border_thickness,
                orientation,
                ..Default::default()
            };
            self.add_line(edge, &prop)?;
        }
        Ok(())
    }

    fn add_debug_border(&mut self, cell: Cell) -> Result<(), FolioError> {
        let rect = self.to_px(cell);
        self.outline(rect, DEBUG_GRAY)
    }
}
