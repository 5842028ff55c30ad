//! # Graphic Components
//!
//! Images, separator lines and signature slots.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use super::{Col, Component, Row, configured};
use crate::config::Config;
use crate::entity::{Cell, Dimensions, Extension};
use crate::error::FolioError;
use crate::geometry::{self, center_correction};
use crate::props::{LineProp, LineStyle, Orientation, Rect, SignatureProp, pt_to_mm};
use crate::provider::Provider;
use crate::structure::Structure;

// ============================================================================
// IMAGE
// ============================================================================

/// An embedded PNG or JPEG image, fitted to its cell by aspect ratio.
///
/// The pixel size is read when the image is created, so rendering never
/// decodes.
pub struct Image {
    bytes: Vec<u8>,
    extension: Extension,
    natural: Dimensions,
    prop: Rect,
    config: Option<Arc<Config>>,
}

impl Image {
    /// Create an image from encoded bytes.
    pub fn from_bytes(bytes: Vec<u8>, extension: Extension) -> Result<Self, FolioError> {
        let (width, height) =
            image::ImageReader::with_format(Cursor::new(&bytes), extension.image_format())
                .into_dimensions()?;
        let natural = Dimensions::new(width as f64, height as f64);
        if !natural.is_valid() {
            return Err(FolioError::Image("image has no pixels".into()));
        }

        Ok(Self {
            bytes,
            extension,
            natural,
            prop: Rect::default().make_valid(),
            config: None,
        })
    }

    /// Read an image file; the format comes from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = path.as_ref();
        let extension = Extension::from_path(path).ok_or_else(|| {
            FolioError::Image(format!("unsupported image extension: {}", path.display()))
        })?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes, extension)
    }

    pub fn with_prop(mut self, prop: Rect) -> Self {
        self.prop = prop.make_valid();
        self
    }

    pub fn centered(self, percent: f64) -> Self {
        self.with_prop(Rect::centered(percent))
    }

    /// Wrap the image in a column of the given size.
    pub fn col(self, size: u8) -> Col {
        Col::new(size).add(self)
    }

    /// Wrap the image in a full-width row of the given height.
    pub fn row(self, height: f64) -> Row {
        Row::new(height).add(Col::auto().add(self))
    }

    pub fn natural_size(&self) -> Dimensions {
        self.natural
    }

    pub fn extension(&self) -> Extension {
        self.extension
    }
}

impl Component for Image {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "image")?;
        let fitted = geometry::try_fit_cell(self.natural, cell.dimensions(), &self.prop)?;
        provider.add_image(&self.bytes, self.extension, fitted.offset(cell.x, cell.y))
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "image")?;
        Ok(Structure::new("image")
            .with_value(self.extension.name())
            .with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

// ============================================================================
// LINE
// ============================================================================

/// A horizontal or vertical separator.
///
/// ## Example
///
/// ```
/// use folio::components::Line;
/// use folio::props::LineStyle;
///
/// let rule = Line::new().thickness(0.5).style(LineStyle::Dashed);
/// ```
pub struct Line {
    prop: LineProp,
    config: Option<Arc<Config>>,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    pub fn new() -> Self {
        Self {
            prop: LineProp::default(),
            config: None,
        }
    }

    pub fn col(size: u8) -> Col {
        Col::new(size).add(Self::new())
    }

    pub fn row(height: f64) -> Row {
        Row::new(height).add(Col::auto().add(Self::new()))
    }

    pub fn with_prop(mut self, prop: LineProp) -> Self {
        self.prop = prop.make_valid();
        self
    }

    pub fn vertical(mut self) -> Self {
        self.prop.orientation = Orientation::Vertical;
        self
    }

    pub fn thickness(self, thickness: f64) -> Self {
        let prop = LineProp {
            thickness,
            ..self.prop
        };
        self.with_prop(prop)
    }

    pub fn style(mut self, style: LineStyle) -> Self {
        self.prop.style = style;
        self
    }
}

/// Rectangle covered by a line inside `cell`.
///
/// The line sits at `offset_percent` of the cross axis and spans
/// `size_percent` of the main axis, centered.
pub(crate) fn line_cell(cell: Cell, prop: &LineProp) -> Cell {
    let half = prop.thickness / 2.0;
    match prop.orientation {
        Orientation::Horizontal => {
            let width = cell.width * prop.size_percent / 100.0;
            let y = cell.y + cell.height * prop.offset_percent / 100.0;
            Cell::new(
                cell.x + center_correction(cell.width, width),
                y - half,
                width,
                prop.thickness,
            )
        }
        Orientation::Vertical => {
            let height = cell.height * prop.size_percent / 100.0;
            let x = cell.x + cell.width * prop.offset_percent / 100.0;
            Cell::new(
                x - half,
                cell.y + center_correction(cell.height, height),
                prop.thickness,
                height,
            )
        }
    }
}

impl Component for Line {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "line")?;
        provider.add_line(line_cell(cell, &self.prop), &self.prop)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "line")?;
        Ok(Structure::new("line").with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// A signature slot: a line with a centered label under it.
///
/// ```text
/// ┌──────────────────────────────┐
/// │                              │
/// │   ────────────────────────   │  y = bottom - label - padding
/// │          John Smith          │
/// └──────────────────────────────┘
/// ```
pub struct Signature {
    value: String,
    prop: SignatureProp,
    config: Option<Arc<Config>>,
}

impl Signature {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            prop: SignatureProp::default(),
            config: None,
        }
    }

    pub fn col(size: u8, value: impl Into<String>) -> Col {
        Col::new(size).add(Self::new(value))
    }

    pub fn row(height: f64, value: impl Into<String>) -> Row {
        Row::new(height).add(Col::auto().add(Self::new(value)))
    }

    pub fn with_prop(mut self, prop: SignatureProp) -> Self {
        self.prop = prop.make_valid();
        self
    }

    /// Line and label cells for `cell`.
    fn cells(&self, cell: Cell) -> (Cell, Cell) {
        let label = pt_to_mm(self.prop.font_size);
        let line_y = cell.bottom() - label - self.prop.safe_padding;
        let line = line_cell(
            Cell::new(cell.x, line_y, cell.width, 0.0),
            &self.prop.line_prop(),
        );
        let text = Cell::new(cell.x, line_y + self.prop.safe_padding, cell.width, label);
        (line, text)
    }
}

impl Component for Signature {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "signature")?;
        let (line, text) = self.cells(cell);
        provider.add_line(line, &self.prop.line_prop())?;
        provider.add_text(&self.value, text, &self.prop.text_prop())
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "signature")?;
        Ok(Structure::new("signature")
            .with_value(&self.value)
            .with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}
