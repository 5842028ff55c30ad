//! # Text Components
//!
//! Text is handed to the provider with its column cell; wrapping and font
//! metrics belong to the provider.

use std::sync::Arc;

use super::{Col, Component, Row, configured};
use crate::config::Config;
use crate::entity::Cell;
use crate::error::FolioError;
use crate::props::{Align, Color, FontStyle, TextProp};
use crate::provider::Provider;
use crate::structure::Structure;

/// A text component with optional styling.
///
/// ## Example
///
/// ```
/// use folio::components::Text;
/// use folio::props::Color;
///
/// // Simple text
/// let text = Text::new("Hello, World!");
///
/// // Styled text
/// let styled = Text::new("IMPORTANT")
///     .bold()
///     .center()
///     .size(14.0)
///     .color(Color::RED);
/// ```
pub struct Text {
    value: String,
    prop: TextProp,
    config: Option<Arc<Config>>,
}

impl Text {
    /// Create a new text component.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            prop: TextProp::default(),
            config: None,
        }
    }

    /// Wrap a text in a column of the given size.
    pub fn col(size: u8, value: impl Into<String>) -> Col {
        Col::new(size).add(Self::new(value))
    }

    /// Wrap a text in a full-width row of the given height.
    pub fn row(height: f64, value: impl Into<String>) -> Row {
        Row::new(height).add(Col::auto().add(Self::new(value)))
    }

    /// Replace all text properties.
    pub fn with_prop(mut self, prop: TextProp) -> Self {
        self.prop = prop.make_valid();
        self
    }

    pub fn bold(mut self) -> Self {
        self.prop.style = match self.prop.style {
            FontStyle::Italic | FontStyle::BoldItalic => FontStyle::BoldItalic,
            _ => FontStyle::Bold,
        };
        self
    }

    pub fn italic(mut self) -> Self {
        self.prop.style = match self.prop.style {
            FontStyle::Bold | FontStyle::BoldItalic => FontStyle::BoldItalic,
            _ => FontStyle::Italic,
        };
        self
    }

    pub fn center(mut self) -> Self {
        self.prop.align = Align::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.prop.align = Align::Right;
        self
    }

    /// Font size in points. Non-positive sizes fall back to 10.
    pub fn size(mut self, size: f64) -> Self {
        self.prop = TextProp { size, ..self.prop }.make_valid();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.prop.color = Some(color);
        self
    }

    /// Padding from the top of the cell, in mm.
    pub fn top(mut self, top: f64) -> Self {
        self.prop = TextProp { top, ..self.prop }.make_valid();
        self
    }

    pub fn hyperlink(mut self, url: impl Into<String>) -> Self {
        self.prop.hyperlink = Some(url.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn prop(&self) -> &TextProp {
        &self.prop
    }
}

impl Component for Text {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "text")?;
        provider.add_text(&self.value, cell, &self.prop)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "text")?;
        Ok(Structure::new("text")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderCall, RecordingProvider};
    use serde_json::json;

    #[test]
    fn test_render_passes_cell_unchanged() {
        let mut text = Text::new("Hello").center();
        text.set_config(Arc::new(Config::default()));

        let mut provider = RecordingProvider::new();
        let cell = Cell::new(10.0, 20.0, 95.0, 15.0);
        text.render(&mut provider, cell).unwrap();

        match &provider.calls()[0] {
            ProviderCall::Text { text, cell: drawn, prop } => {
                assert_eq!(text, "Hello");
                assert_eq!(*drawn, cell);
                assert_eq!(prop.align, Align::Center);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_render_unconfigured_fails() {
        let text = Text::new("Hello");
        let mut provider = RecordingProvider::new();
        let err = text.render(&mut provider, Cell::default()).unwrap_err();
        assert!(matches!(err, FolioError::NotConfigured("text")));
        assert!(provider.calls().is_empty());
        assert!(matches!(text.structure(), Err(FolioError::NotConfigured("text"))));
    }

    #[test]
    fn test_structure() {
        let mut text = Text::new("Total").bold().size(12.0);
        text.set_config(Arc::new(Config::default()));
        let structure = text.structure().unwrap();
        assert_eq!(structure.kind, "text");
        assert_eq!(structure.value, "Total");
        assert_eq!(structure.details["prop_font_style"], json!("B"));
        assert_eq!(structure.details["prop_font_size"], json!(12.0));
    }

    #[test]
    fn test_style_combination() {
        let text = Text::new("x").italic().bold();
        assert_eq!(text.prop().style, FontStyle::BoldItalic);
    }

    #[test]
    fn test_invalid_size_falls_back() {
        let text = Text::new("x").size(-3.0);
        assert_eq!(text.prop().size, 10.0);
    }

    #[test]
    fn test_row_helper() {
        let mut row = Text::row(10.0, "Heading");
        row.set_config(Arc::new(Config::default()));
        let structure = row.structure().unwrap();
        assert_eq!(structure.kind, "row");
        assert_eq!(structure.children[0].children[0].value, "Heading");
    }
}
