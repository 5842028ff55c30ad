//! Provider that records calls instead of drawing.

use std::fmt;

use super::Provider;
use crate::entity::{Cell, Extension};
use crate::error::FolioError;
use crate::props::{BarcodeProp, CellStyle, LineProp, Rect, TextProp};

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Page { index: usize },
    Text { text: String, cell: Cell, prop: TextProp },
    Image { extension: Extension, bytes: usize, cell: Cell },
    QrCode { code: String, cell: Cell, prop: Rect },
    MatrixCode { code: String, cell: Cell, prop: Rect },
    BarCode { code: String, cell: Cell, prop: BarcodeProp },
    Line { cell: Cell, prop: LineProp },
    CellStyle { cell: Cell, style: CellStyle },
    DebugBorder { cell: Cell },
}

impl ProviderCall {
    /// Short name, matching the structure node type of the component that
    /// usually issues the call.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderCall::Page { .. } => "page",
            ProviderCall::Text { .. } => "text",
            ProviderCall::Image { .. } => "image",
            ProviderCall::QrCode { .. } => "qrcode",
            ProviderCall::MatrixCode { .. } => "matrixcode",
            ProviderCall::BarCode { .. } => "barcode",
            ProviderCall::Line { .. } => "line",
            ProviderCall::CellStyle { .. } => "cell_style",
            ProviderCall::DebugBorder { .. } => "debug_border",
        }
    }

    pub fn cell(&self) -> Option<Cell> {
        match self {
            ProviderCall::Page { .. } => None,
            ProviderCall::Text { cell, .. }
            | ProviderCall::Image { cell, .. }
            | ProviderCall::QrCode { cell, .. }
            | ProviderCall::MatrixCode { cell, .. }
            | ProviderCall::BarCode { cell, .. }
            | ProviderCall::Line { cell, .. }
            | ProviderCall::CellStyle { cell, .. }
            | ProviderCall::DebugBorder { cell } => Some(*cell),
        }
    }
}

impl fmt::Display for ProviderCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let ProviderCall::Page { index } = self {
            return write!(f, "page {}", index + 1);
        }
        write!(f, "  {:<12}", self.kind())?;
        if let Some(c) = self.cell() {
            write!(
                f,
                " x={:>7.2} y={:>7.2} w={:>7.2} h={:>7.2}",
                c.x, c.y, c.width, c.height
            )?;
        }
        match self {
            ProviderCall::Text { text, .. }
            | ProviderCall::QrCode { code: text, .. }
            | ProviderCall::MatrixCode { code: text, .. }
            | ProviderCall::BarCode { code: text, .. } => write!(f, "  {:?}", text),
            ProviderCall::Image { extension, bytes, .. } => {
                write!(f, "  {} ({} bytes)", extension.name(), bytes)
            }
            _ => Ok(()),
        }
    }
}

/// Records every call in order.
///
/// ## Example
///
/// ```
/// use folio::components::{Col, QrCode, Row};
/// use folio::config::Config;
/// use folio::document::Document;
/// use folio::provider::RecordingProvider;
///
/// let doc = Document::new(Config::default())
///     .add_row(Row::new(40.0).add(Col::new(6).add(QrCode::new("https://example.com"))))
///     .seal();
///
/// let mut provider = RecordingProvider::new();
/// doc.render(&mut provider).unwrap();
/// assert_eq!(provider.cells_of("qrcode").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingProvider {
    calls: Vec<ProviderCall>,
    fail_on: Option<&'static str>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that fails the first call of the given kind.
    pub fn failing_on(kind: &'static str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(kind),
        }
    }

    pub fn calls(&self) -> &[ProviderCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<ProviderCall> {
        self.calls
    }

    /// Cells of every call of the given kind, in call order.
    pub fn cells_of(&self, kind: &str) -> Vec<Cell> {
        self.calls
            .iter()
            .filter(|call| call.kind() == kind)
            .filter_map(ProviderCall::cell)
            .collect()
    }

    fn record(&mut self, call: ProviderCall) -> Result<(), FolioError> {
        if self.fail_on == Some(call.kind()) {
            return Err(FolioError::Provider(format!("{} rejected", call.kind())));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Provider for RecordingProvider {
    fn add_page(&mut self, index: usize) -> Result<(), FolioError> {
        self.record(ProviderCall::Page { index })
    }

    fn add_text(&mut self, text: &str, cell: Cell, prop: &TextProp) -> Result<(), FolioError> {
        self.record(ProviderCall::Text {
            text: text.to_string(),
            cell,
            prop: prop.clone(),
        })
    }

    fn add_image(&mut self, bytes: &[u8], extension: Extension, cell: Cell) -> Result<(), FolioError> {
        self.record(ProviderCall::Image {
            extension,
            bytes: bytes.len(),
            cell,
        })
    }

    fn add_qr_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError> {
        self.record(ProviderCall::QrCode {
            code: code.to_string(),
            cell,
            prop: *prop,
        })
    }

    fn add_matrix_code(&mut self, code: &str, cell: Cell, prop: &Rect) -> Result<(), FolioError> {
        self.record(ProviderCall::MatrixCode {
            code: code.to_string(),
            cell,
            prop: *prop,
        })
    }

    fn add_bar_code(&mut self, code: &str, cell: Cell, prop: &BarcodeProp) -> Result<(), FolioError> {
        self.record(ProviderCall::BarCode {
            code: code.to_string(),
            cell,
            prop: *prop,
        })
    }

    fn add_line(&mut self, cell: Cell, prop: &LineProp) -> Result<(), FolioError> {
        self.record(ProviderCall::Line { cell, prop: *prop })
    }

    fn add_cell_style(&mut self, cell: Cell, style: &CellStyle) -> Result<(), FolioError> {
        self.record(ProviderCall::CellStyle { cell, style: *style })
    }

    fn add_debug_border(&mut self, cell: Cell) -> Result<(), FolioError> {
        self.record(ProviderCall::DebugBorder { cell })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut provider = RecordingProvider::new();
        provider.add_page(0).unwrap();
        provider
            .add_text("hi", Cell::new(1.0, 2.0, 3.0, 4.0), &TextProp::default())
            .unwrap();
        provider
            .add_line(Cell::new(0.0, 0.0, 10.0, 0.2), &LineProp::default())
            .unwrap();

        let kinds: Vec<_> = provider.calls().iter().map(ProviderCall::kind).collect();
        assert_eq!(kinds, vec!["page", "text", "line"]);
        assert_eq!(provider.cells_of("text"), vec![Cell::new(1.0, 2.0, 3.0, 4.0)]);
    }

    #[test]
    fn test_failing_on_kind() {
        let mut provider = RecordingProvider::failing_on("qrcode");
        provider.add_page(0).unwrap();
        let err = provider
            .add_qr_code("x", Cell::default(), &Rect::default())
            .unwrap_err();
        assert!(matches!(err, FolioError::Provider(msg) if msg == "qrcode rejected"));
        assert_eq!(provider.calls().len(), 1);
    }

    #[test]
    fn test_display() {
        let call = ProviderCall::QrCode {
            code: "abc".into(),
            cell: Cell::new(10.0, 20.0, 30.0, 30.0),
            prop: Rect::default(),
        };
        assert_eq!(
            call.to_string(),
            "  qrcode       x=  10.00 y=  20.00 w=  30.00 h=  30.00  \"abc\""
        );
        assert_eq!(ProviderCall::Page { index: 0 }.to_string(), "page 1");
    }
}
