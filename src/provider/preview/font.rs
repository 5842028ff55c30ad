//! Bitmap glyphs for preview text.
//!
//! Uses the Spleen bitmap font family. Labels only need to be legible in a
//! preview, so glyphs are drawn at their native size and never scaled.

use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

/// Glyph cell size of a Spleen face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSize {
    pub width: usize,
    pub height: usize,
}

impl GlyphSize {
    pub const SMALL: GlyphSize = GlyphSize {
        width: 6,
        height: 12,
    };

    pub const LARGE: GlyphSize = GlyphSize {
        width: 12,
        height: 24,
    };

    /// Largest face whose height fits `line_px`.
    pub fn for_line_height(line_px: f64) -> GlyphSize {
        if line_px >= Self::LARGE.height as f64 {
            Self::LARGE
        } else {
            Self::SMALL
        }
    }
}

/// Rasterize `text` into one bitmap per character.
/// Each bitmap holds `width * height` bytes, 1 = ink.
pub fn glyphs(text: &str, size: GlyphSize) -> Vec<Vec<u8>> {
    let data = if size == GlyphSize::LARGE {
        FONT_12X24
    } else {
        FONT_6X12
    };
    let mut font = PSF2Font::new(data).ok();

    text.chars()
        .map(|ch| {
            let mut glyph = vec![0u8; size.width * size.height];
            let utf8 = ch.to_string();
            let found = match font.as_mut() {
                Some(font) => match font.glyph_for_utf8(utf8.as_bytes()) {
                    Some(rows) => {
                        for (row_y, row) in rows.enumerate() {
                            for (col_x, on) in row.enumerate() {
                                let idx = row_y * size.width + col_x;
                                if col_x < size.width && idx < glyph.len() {
                                    glyph[idx] = if on { 1 } else { 0 };
                                }
                            }
                        }
                        true
                    }
                    None => false,
                },
                None => false,
            };
            if !found && !ch.is_whitespace() {
                draw_box(&mut glyph, size.width, size.height);
            }
            glyph
        })
        .collect()
}

/// Box outline standing in for characters missing from the font.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
