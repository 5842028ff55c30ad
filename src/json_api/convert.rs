//! Conversion from JSON schema types to folio components.

use std::fmt;
use std::path::Path;

use crate::components::*;
use crate::config::{Config, ConfigBuilder, PageSize};
use crate::document::Document;
use crate::error::FolioError;
use crate::props::{
    Align, BarcodeKind, BarcodeProp, CellStyle, Color, FontStyle, LineProp, LineStyle, Orientation,
    Rect, SignatureProp, TextProp,
};

use super::schema::*;

/// Errors from JSON → component conversion.
#[derive(Debug)]
pub enum JsonApiError {
    /// A field value is invalid.
    InvalidField {
        component: &'static str,
        field: &'static str,
        message: String,
    },
    /// A referenced file could not be loaded.
    Load { path: String, message: String },
}

impl fmt::Display for JsonApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonApiError::InvalidField {
                component,
                field,
                message,
            } => write!(f, "{}: invalid {}: {}", component, field, message),
            JsonApiError::Load { path, message } => write!(f, "{}: {}", path, message),
        }
    }
}

impl std::error::Error for JsonApiError {}

impl From<JsonApiError> for FolioError {
    fn from(e: JsonApiError) -> Self {
        FolioError::Document(e.to_string())
    }
}

fn invalid(component: &'static str, field: &'static str, expected: &str, got: &str) -> JsonApiError {
    JsonApiError::InvalidField {
        component,
        field,
        message: format!("expected {}, got \"{}\"", expected, got),
    }
}

impl JsonDocument {
    /// Build a document. Image paths resolve against `base_dir`.
    pub fn into_document(self, base_dir: &Path) -> Result<Document, JsonApiError> {
        let to_rows = |rows: Vec<JsonRow>| -> Result<Vec<Row>, JsonApiError> {
            rows.into_iter().map(|row| row.into_row(base_dir)).collect()
        };

        let mut doc = Document::new(self.config.to_config()?)
            .register_header(to_rows(self.header)?)
            .register_footer(to_rows(self.footer)?);

        for block in self.rows {
            doc = match block {
                JsonBlock::Row(row) => doc.add_row(row.into_row(base_dir)?),
                JsonBlock::Page(rows) => doc.add_page(Page::new().add_all(to_rows(rows)?)),
            };
        }
        Ok(doc)
    }
}

impl JsonConfig {
    /// Convert to a [`Config`]. Unknown page sizes and orientations are errors.
    pub fn to_config(&self) -> Result<Config, JsonApiError> {
        let mut page_size = match &self.page_size {
            None => PageSize::default(),
            Some(JsonPageSize::Named(name)) => PageSize::by_name(name)
                .ok_or_else(|| invalid("config", "page_size", "a4, a5, letter or legal", name))?,
            Some(JsonPageSize::Custom { width, height }) => {
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(JsonApiError::InvalidField {
                        component: "config",
                        field: "page_size",
                        message: format!("dimensions must be positive, got {}x{}", width, height),
                    });
                }
                PageSize {
                    width: *width,
                    height: *height,
                }
            }
        };

        match self.orientation.as_deref() {
            None | Some("portrait") => {}
            Some("landscape") => page_size = page_size.landscape(),
            Some(other) => return Err(invalid("config", "orientation", "\"portrait\" or \"landscape\"", other)),
        }

        let mut builder = ConfigBuilder::new()
            .with_page_size(page_size)
            .with_debug(self.debug);
        if let Some(margins) = self.margins {
            builder = builder.with_margins(margins);
        }
        if let Some(page_number) = &self.page_number {
            builder = builder.with_page_number(page_number.clone());
        }
        if let Some(title) = &self.title {
            builder = builder.with_title(title);
        }
        if let Some(author) = &self.author {
            builder = builder.with_author(author);
        }
        if let Some(date) = self.creation_date {
            builder = builder.with_creation_date(date);
        }
        Ok(builder.build())
    }
}

impl JsonRow {
    fn into_row(self, base_dir: &Path) -> Result<Row, JsonApiError> {
        let cols = self
            .cols
            .into_iter()
            .map(|col| col.into_col(base_dir))
            .collect::<Result<Vec<_>, _>>()?;
        let row = Row::new(self.height).add_all(cols);
        Ok(match self.style {
            Some(style) => row.with_style(style.into_style()),
            None => row,
        })
    }
}

impl JsonCol {
    fn into_col(self, base_dir: &Path) -> Result<Col, JsonApiError> {
        let mut col = match self.size {
            Some(size) => Col::new(size),
            None => Col::auto(),
        };
        if let Some(style) = self.style {
            col = col.with_style(style.into_style());
        }
        let components = self
            .components
            .into_iter()
            .map(|component| component.into_boxed(base_dir))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(col.add_all(components))
    }
}

impl JsonComponent {
    /// Convert to a boxed Component trait object.
    fn into_boxed(self, base_dir: &Path) -> Result<Box<dyn Component>, JsonApiError> {
        match self {
            JsonComponent::Text(t) => Ok(Box::new(t.into_component()?)),
            JsonComponent::QrCode(c) => Ok(Box::new(QrCode::new(c.value).with_prop(c.placement.rect()))),
            JsonComponent::MatrixCode(c) => {
                Ok(Box::new(MatrixCode::new(c.value).with_prop(c.placement.rect())))
            }
            JsonComponent::Barcode(b) => Ok(Box::new(b.into_component()?)),
            JsonComponent::Image(i) => Ok(Box::new(i.into_component(base_dir)?)),
            JsonComponent::Signature(s) => Ok(Box::new(s.into_component())),
            JsonComponent::Line(l) => Ok(Box::new(l.into_component()?)),
        }
    }
}

// ============ Component Conversions ============

fn color(rgb: [u8; 3]) -> Color {
    Color::rgb(rgb[0], rgb[1], rgb[2])
}

impl JsonCellStyle {
    fn into_style(self) -> CellStyle {
        let defaults = CellStyle::default();
        CellStyle {
            background_color: self.background_color.map(color),
            border_type: self.border_type,
            border_color: self.border_color.map(color),
            border_thickness: self.border_thickness.unwrap_or(defaults.border_thickness),
            line_style: self.line_style,
        }
    }
}

impl JsonPlacement {
    fn rect(&self) -> Rect {
        let percent = self.percent.unwrap_or(100.0);
        if self.center {
            Rect::centered(percent)
        } else {
            Rect::anchored(percent, self.top.unwrap_or(0.0), self.left.unwrap_or(0.0))
        }
    }
}

impl JsonText {
    fn into_component(self) -> Result<Text, JsonApiError> {
        let align = match self.align.as_deref() {
            None | Some("left") => Align::Left,
            Some("center") => Align::Center,
            Some("right") => Align::Right,
            Some(other) => return Err(invalid("text", "align", "\"left\", \"center\", or \"right\"", other)),
        };
        let style = match (self.bold, self.italic) {
            (false, false) => FontStyle::Normal,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        };
        let defaults = TextProp::default();
        let prop = TextProp {
            align,
            top: self.top.unwrap_or(defaults.top),
            left: self.left.unwrap_or(defaults.left),
            right: self.right.unwrap_or(defaults.right),
            size: self.size.unwrap_or(defaults.size),
            style,
            color: self.color.map(color),
            hyperlink: self.hyperlink,
        };
        Ok(Text::new(self.value).with_prop(prop))
    }
}

impl JsonBarcode {
    fn into_component(self) -> Result<Barcode, JsonApiError> {
        let kind = match self.kind.as_deref() {
            None | Some("code128") => BarcodeKind::Code128,
            Some("code39") => BarcodeKind::Code39,
            Some("ean13") => BarcodeKind::Ean13,
            Some(other) => return Err(invalid("barcode", "kind", "\"code128\", \"code39\", or \"ean13\"", other)),
        };
        let rect = self.placement.rect();
        let defaults = BarcodeProp::default();
        let mut proportion = defaults.proportion;
        if let Some(height) = self.proportion {
            proportion.height = height * proportion.width;
        }
        let prop = BarcodeProp {
            percent: rect.percent,
            top: rect.top,
            left: rect.left,
            center: rect.center,
            proportion,
            kind,
        };
        Ok(Barcode::new(self.value).with_prop(prop))
    }
}

impl JsonImage {
    fn into_component(self, base_dir: &Path) -> Result<Image, JsonApiError> {
        let path = base_dir.join(&self.path);
        let image = Image::from_file(&path).map_err(|e| JsonApiError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(image.with_prop(self.placement.rect()))
    }
}

impl JsonSignature {
    fn into_component(self) -> Signature {
        let defaults = SignatureProp::default();
        let prop = SignatureProp {
            font_size: self.font_size.unwrap_or(defaults.font_size),
            line_thickness: self.line_thickness.unwrap_or(defaults.line_thickness),
            safe_padding: self.safe_padding.unwrap_or(defaults.safe_padding),
            ..defaults
        };
        Signature::new(self.value).with_prop(prop)
    }
}

impl JsonLine {
    fn into_component(self) -> Result<Line, JsonApiError> {
        let orientation = match self.orientation.as_deref() {
            None | Some("horizontal") => Orientation::Horizontal,
            Some("vertical") => Orientation::Vertical,
            Some(other) => return Err(invalid("line", "orientation", "\"horizontal\" or \"vertical\"", other)),
        };
        let style = match self.style.as_deref() {
            None | Some("solid") => LineStyle::Solid,
            Some("dashed") => LineStyle::Dashed,
            Some(other) => return Err(invalid("line", "style", "\"solid\" or \"dashed\"", other)),
        };
        let defaults = LineProp::default();
        let prop = LineProp {
            color: self.color.map(color),
            style,
            thickness: self.thickness.unwrap_or(defaults.thickness),
            orientation,
            offset_percent: self.offset_percent.unwrap_or(defaults.offset_percent),
            size_percent: self.size_percent.unwrap_or(defaults.size_percent),
        };
        Ok(Line::new().with_prop(prop))
    }
}
