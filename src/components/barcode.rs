//! # Code Components
//!
//! QR codes, matrix codes and linear barcodes. Each fits its natural shape
//! into the column cell with the geometry engine and hands the fitted cell to
//! the provider, which does the encoding.
//!
//! ```text
//! column cell 60x30, QR at 80% centered
//!
//! ┌────────────────────────────┐
//! │          ┌──────┐          │  side = 30 * 0.8 = 24
//! │          │ ▛▀▜  │          │  x    = (60 - 24) / 2 = 18
//! │          │ ▙▄▟  │          │  y    = (30 - 24) / 2 = 3
//! │          └──────┘          │
//! └────────────────────────────┘
//! ```

use std::sync::Arc;

use super::{Col, Component, Row, configured};
use crate::config::Config;
use crate::entity::{Cell, Dimensions};
use crate::error::FolioError;
use crate::geometry;
use crate::props::{BarcodeKind, BarcodeProp, Rect};
use crate::provider::Provider;
use crate::structure::Structure;

/// Natural size of two-dimensional symbols.
const SQUARE: Dimensions = Dimensions::new(1.0, 1.0);

/// A QR code.
///
/// ## Example
///
/// ```
/// use folio::components::QrCode;
///
/// let qr = QrCode::new("https://example.com").centered(75.0);
/// ```
pub struct QrCode {
    code: String,
    prop: Rect,
    config: Option<Arc<Config>>,
}

impl QrCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            prop: Rect::default().make_valid(),
            config: None,
        }
    }

    pub fn col(size: u8, code: impl Into<String>) -> Col {
        Col::new(size).add(Self::new(code))
    }

    pub fn row(height: f64, code: impl Into<String>) -> Row {
        Row::new(height).add(Col::auto().add(Self::new(code)))
    }

    pub fn with_prop(mut self, prop: Rect) -> Self {
        self.prop = prop.make_valid();
        self
    }

    /// Center the symbol at `percent` of the largest size that fits.
    pub fn centered(self, percent: f64) -> Self {
        self.with_prop(Rect::centered(percent))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn prop(&self) -> &Rect {
        &self.prop
    }
}

impl Component for QrCode {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "qrcode")?;
        let fitted = geometry::try_fit_cell(SQUARE, cell.dimensions(), &self.prop)?;
        provider.add_qr_code(&self.code, fitted.offset(cell.x, cell.y), &self.prop)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "qrcode")?;
        Ok(Structure::new("qrcode")
            .with_value(&self.code)
            .with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

/// A two-dimensional matrix code (DataMatrix style).
pub struct MatrixCode {
    code: String,
    prop: Rect,
    config: Option<Arc<Config>>,
}

impl MatrixCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            prop: Rect::default().make_valid(),
            config: None,
        }
    }

    pub fn col(size: u8, code: impl Into<String>) -> Col {
        Col::new(size).add(Self::new(code))
    }

    pub fn row(height: f64, code: impl Into<String>) -> Row {
        Row::new(height).add(Col::auto().add(Self::new(code)))
    }

    pub fn with_prop(mut self, prop: Rect) -> Self {
        self.prop = prop.make_valid();
        self
    }

    pub fn centered(self, percent: f64) -> Self {
        self.with_prop(Rect::centered(percent))
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Component for MatrixCode {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "matrixcode")?;
        let fitted = geometry::try_fit_cell(SQUARE, cell.dimensions(), &self.prop)?;
        provider.add_matrix_code(&self.code, fitted.offset(cell.x, cell.y), &self.prop)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "matrixcode")?;
        Ok(Structure::new("matrixcode")
            .with_value(&self.code)
            .with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

/// A linear barcode.
///
/// The bars keep the prop's `proportion` (height over width, 0.2 by default).
///
/// ## Example
///
/// ```
/// use folio::components::Barcode;
/// use folio::props::BarcodeKind;
///
/// let barcode = Barcode::new("ORDER-42").kind(BarcodeKind::Code39).centered(90.0);
/// ```
pub struct Barcode {
    code: String,
    prop: BarcodeProp,
    config: Option<Arc<Config>>,
}

impl Barcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            prop: BarcodeProp::default().make_valid(),
            config: None,
        }
    }

    pub fn col(size: u8, code: impl Into<String>) -> Col {
        Col::new(size).add(Self::new(code))
    }

    pub fn row(height: f64, code: impl Into<String>) -> Row {
        Row::new(height).add(Col::auto().add(Self::new(code)))
    }

    pub fn with_prop(mut self, prop: BarcodeProp) -> Self {
        self.prop = prop.make_valid();
        self
    }

    pub fn centered(self, percent: f64) -> Self {
        let prop = BarcodeProp {
            percent,
            top: 0.0,
            left: 0.0,
            center: true,
            ..self.prop
        };
        self.with_prop(prop)
    }

    pub fn kind(mut self, kind: BarcodeKind) -> Self {
        self.prop.kind = kind;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn prop(&self) -> &BarcodeProp {
        &self.prop
    }
}

impl Component for Barcode {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "barcode")?;
        let fitted = geometry::try_fit_cell(self.prop.proportion, cell.dimensions(), &self.prop.rect())?;
        provider.add_bar_code(&self.code, fitted.offset(cell.x, cell.y), &self.prop)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "barcode")?;
        Ok(Structure::new("barcode")
            .with_value(&self.code)
            .with_details(self.prop.to_map()))
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}
