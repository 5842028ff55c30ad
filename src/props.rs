//! # Component Properties
//!
//! Property bags carried by leaf components. Every bag can be normalized with
//! `make_valid`, which returns a new value instead of mutating shared state, and
//! exported with `to_map` as the `details` of a structure node.
//!
//! Normalization never fails: out-of-range values fall back to their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::entity::{Cell, Dimensions};

/// Property details attached to a structure node.
pub type Details = BTreeMap<String, Value>;

const DEFAULT_PERCENT: f64 = 100.0;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// ITU-R BT.601 luma, used by grayscale providers.
    pub fn luma(&self) -> u8 {
        let y = 0.299 * self.red as f64 + 0.587 * self.green as f64 + 0.114 * self.blue as f64;
        y.round().clamp(0.0, 255.0) as u8
    }

    fn to_value(self) -> Value {
        json!(format!("RGB({}, {}, {})", self.red, self.green, self.blue))
    }
}

fn valid_percent(percent: f64) -> f64 {
    if percent.is_finite() && percent > 0.0 && percent <= 100.0 {
        percent
    } else {
        DEFAULT_PERCENT
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

// ============================================================================
// RECT
// ============================================================================

/// Placement of proportional content (codes, images) inside its cell.
///
/// With `center` set the content is centered and `top`/`left` are ignored;
/// otherwise it is anchored at (`left`, `top`) relative to the cell.
/// `percent` scales the fitted content, in `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub percent: f64,
    pub top: f64,
    pub left: f64,
    pub center: bool,
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            percent: DEFAULT_PERCENT,
            top: 0.0,
            left: 0.0,
            center: false,
        }
    }
}

impl Rect {
    /// Centered placement at the given percent.
    pub fn centered(percent: f64) -> Self {
        Self {
            percent,
            center: true,
            ..Default::default()
        }
    }

    /// Anchored placement at (`left`, `top`).
    pub fn anchored(percent: f64, top: f64, left: f64) -> Self {
        Self {
            percent,
            top,
            left,
            center: false,
        }
    }

    /// Normalize: percent unset or outside `(0, 100]` becomes 100, negative
    /// offsets become 0, and centered placement drops its offsets.
    pub fn make_valid(self) -> Self {
        let percent = valid_percent(self.percent);
        if percent != self.percent {
            tracing::debug!(percent = self.percent, "rect percent reset to 100");
        }
        let (top, left) = if self.center {
            (0.0, 0.0)
        } else {
            (non_negative(self.top), non_negative(self.left))
        };
        Self {
            percent,
            top,
            left,
            center: self.center,
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = Details::new();
        map.insert("prop_percent".into(), json!(self.percent));
        if self.center {
            map.insert("prop_center".into(), json!(true));
        } else {
            map.insert("prop_top".into(), json!(self.top));
            map.insert("prop_left".into(), json!(self.left));
        }
        map
    }
}

// ============================================================================
// BARCODE
// ============================================================================

/// 1D barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeKind {
    #[default]
    Code128,
    Code39,
    Ean13,
}

impl BarcodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeKind::Code128 => "code128",
            BarcodeKind::Code39 => "code39",
            BarcodeKind::Ean13 => "ean13",
        }
    }
}

/// Placement of a 1D barcode: a [`Rect`] plus the bar/height proportion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeProp {
    pub percent: f64,
    pub top: f64,
    pub left: f64,
    pub center: bool,
    /// Natural aspect of the symbol (default 1 x 0.2).
    pub proportion: Dimensions,
    pub kind: BarcodeKind,
}

impl Default for BarcodeProp {
    fn default() -> Self {
        Self {
            percent: DEFAULT_PERCENT,
            top: 0.0,
            left: 0.0,
            center: false,
            proportion: Dimensions::new(1.0, 0.2),
            kind: BarcodeKind::default(),
        }
    }
}

impl BarcodeProp {
    /// The placement part of this prop.
    pub fn rect(&self) -> Rect {
        Rect {
            percent: self.percent,
            top: self.top,
            left: self.left,
            center: self.center,
        }
    }

    /// Normalize the placement like [`Rect::make_valid`]; the proportion keeps
    /// a height between 10% and 100% of its width.
    pub fn make_valid(self) -> Self {
        let rect = self.rect().make_valid();

        let width = if self.proportion.width.is_finite() && self.proportion.width > 0.0 {
            self.proportion.width
        } else {
            1.0
        };
        let height = if self.proportion.height.is_finite() && self.proportion.height > 0.0 {
            self.proportion.height
        } else {
            width * 0.2
        };
        let height = height.clamp(width * 0.1, width);

        Self {
            percent: rect.percent,
            top: rect.top,
            left: rect.left,
            center: rect.center,
            proportion: Dimensions::new(width, height),
            kind: self.kind,
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = self.rect().to_map();
        map.insert("prop_barcode_type".into(), json!(self.kind.name()));
        map.insert("prop_proportion_width".into(), json!(self.proportion.width));
        map.insert("prop_proportion_height".into(), json!(self.proportion.height));
        map
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Horizontal text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn name(&self) -> &'static str {
        match self {
            Align::Left => "L",
            Align::Center => "C",
            Align::Right => "R",
        }
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn name(&self) -> &'static str {
        match self {
            FontStyle::Normal => "",
            FontStyle::Bold => "B",
            FontStyle::Italic => "I",
            FontStyle::BoldItalic => "BI",
        }
    }
}

/// Text styling and padding inside its cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProp {
    pub align: Align,
    pub top: f64,
    pub left: f64,
    pub right: f64,
    /// Font size in points.
    pub size: f64,
    pub style: FontStyle,
    pub color: Option<Color>,
    pub hyperlink: Option<String>,
}

impl Default for TextProp {
    fn default() -> Self {
        Self {
            align: Align::Left,
            top: 0.0,
            left: 0.0,
            right: 0.0,
            size: 10.0,
            style: FontStyle::Normal,
            color: None,
            hyperlink: None,
        }
    }
}

impl TextProp {
    pub fn make_valid(self) -> Self {
        let size = if self.size.is_finite() && self.size > 0.0 {
            self.size
        } else {
            10.0
        };
        Self {
            top: non_negative(self.top),
            left: non_negative(self.left),
            right: non_negative(self.right),
            size,
            ..self
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = Details::new();
        map.insert("prop_align".into(), json!(self.align.name()));
        map.insert("prop_font_size".into(), json!(self.size));
        if self.style != FontStyle::Normal {
            map.insert("prop_font_style".into(), json!(self.style.name()));
        }
        if self.top > 0.0 {
            map.insert("prop_top".into(), json!(self.top));
        }
        if self.left > 0.0 {
            map.insert("prop_left".into(), json!(self.left));
        }
        if self.right > 0.0 {
            map.insert("prop_right".into(), json!(self.right));
        }
        if let Some(color) = self.color {
            map.insert("prop_color".into(), color.to_value());
        }
        if let Some(link) = &self.hyperlink {
            map.insert("prop_hyperlink".into(), json!(link));
        }
        map
    }
}

// ============================================================================
// LINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn name(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
        }
    }
}

/// A separator line drawn across its cell.
///
/// `offset_percent` places the line along the cross axis (50 = middle of the
/// cell); `size_percent` is how much of the main axis it spans, centered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineProp {
    pub color: Option<Color>,
    pub style: LineStyle,
    pub thickness: f64,
    pub orientation: Orientation,
    pub offset_percent: f64,
    pub size_percent: f64,
}

impl Default for LineProp {
    fn default() -> Self {
        Self {
            color: None,
            style: LineStyle::Solid,
            thickness: 0.2,
            orientation: Orientation::Horizontal,
            offset_percent: 50.0,
            size_percent: 90.0,
        }
    }
}

impl LineProp {
    pub fn make_valid(self) -> Self {
        let thickness = if self.thickness.is_finite() && self.thickness > 0.0 {
            self.thickness
        } else {
            0.2
        };
        let offset_percent = if (0.0..=100.0).contains(&self.offset_percent) {
            self.offset_percent
        } else {
            50.0
        };
        let size_percent = if self.size_percent > 0.0 && self.size_percent <= 100.0 {
            self.size_percent
        } else {
            90.0
        };
        Self {
            thickness,
            offset_percent,
            size_percent,
            ..self
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = Details::new();
        map.insert(
            "prop_orientation".into(),
            json!(match self.orientation {
                Orientation::Horizontal => "horizontal",
                Orientation::Vertical => "vertical",
            }),
        );
        map.insert("prop_style".into(), json!(self.style.name()));
        map.insert("prop_thickness".into(), json!(self.thickness));
        map.insert("prop_offset_percent".into(), json!(self.offset_percent));
        map.insert("prop_size_percent".into(), json!(self.size_percent));
        if let Some(color) = self.color {
            map.insert("prop_color".into(), color.to_value());
        }
        map
    }
}

// ============================================================================
// SIGNATURE
// ============================================================================

/// A signature slot: a line with a label under it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureProp {
    /// Label font size in points.
    pub font_size: f64,
    pub font_style: FontStyle,
    pub line_thickness: f64,
    pub line_style: LineStyle,
    /// Gap between the line and the label, in mm.
    pub safe_padding: f64,
}

impl Default for SignatureProp {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            font_style: FontStyle::Bold,
            line_thickness: 0.2,
            line_style: LineStyle::Solid,
            safe_padding: 1.5,
        }
    }
}

impl SignatureProp {
    pub fn make_valid(self) -> Self {
        let defaults = Self::default();
        Self {
            font_size: if self.font_size > 0.0 {
                self.font_size
            } else {
                defaults.font_size
            },
            line_thickness: if self.line_thickness > 0.0 {
                self.line_thickness
            } else {
                defaults.line_thickness
            },
            safe_padding: non_negative(self.safe_padding),
            ..self
        }
    }

    /// Label text props derived from this signature.
    pub fn text_prop(&self) -> TextProp {
        TextProp {
            align: Align::Center,
            size: self.font_size,
            style: self.font_style,
            ..Default::default()
        }
    }

    /// Line props derived from this signature.
    pub fn line_prop(&self) -> LineProp {
        LineProp {
            style: self.line_style,
            thickness: self.line_thickness,
            ..Default::default()
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = Details::new();
        map.insert("prop_font_size".into(), json!(self.font_size));
        map.insert("prop_font_style".into(), json!(self.font_style.name()));
        map.insert("prop_line_thickness".into(), json!(self.line_thickness));
        map.insert("prop_safe_padding".into(), json!(self.safe_padding));
        map
    }
}

// ============================================================================
// CELL STYLE
// ============================================================================

/// Edges of a cell that get a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderType {
    #[default]
    None,
    Full,
    Left,
    Top,
    Right,
    Bottom,
}

impl BorderType {
    pub fn name(&self) -> &'static str {
        match self {
            BorderType::None => "none",
            BorderType::Full => "full",
            BorderType::Left => "left",
            BorderType::Top => "top",
            BorderType::Right => "right",
            BorderType::Bottom => "bottom",
        }
    }
}

/// Background and border of a row or column cell.
///
/// ```
/// use folio::entity::Cell;
/// use folio::props::{BorderType, CellStyle, Color};
///
/// let style = CellStyle {
///     background_color: Some(Color::rgb(200, 200, 200)),
///     border_type: BorderType::Bottom,
///     border_thickness: 0.5,
///     ..Default::default()
/// };
/// let edges = style.border_cells(Cell::new(0.0, 0.0, 100.0, 10.0));
/// assert_eq!(edges, vec![Cell::new(0.0, 9.5, 100.0, 0.5)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub background_color: Option<Color>,
    pub border_type: BorderType,
    pub border_color: Option<Color>,
    /// Border width in mm, drawn inside the cell.
    pub border_thickness: f64,
    pub line_style: LineStyle,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background_color: None,
            border_type: BorderType::None,
            border_color: None,
            border_thickness: 0.2,
            line_style: LineStyle::Solid,
        }
    }
}

impl CellStyle {
    pub fn make_valid(self) -> Self {
        let border_thickness = if self.border_thickness.is_finite() && self.border_thickness > 0.0 {
            self.border_thickness
        } else {
            0.2
        };
        Self {
            border_thickness,
            ..self
        }
    }

    /// Whether drawing this style changes anything.
    pub fn is_visible(&self) -> bool {
        self.background_color.is_some() || self.border_type != BorderType::None
    }

    /// Strips covered by the border inside `cell`, thickness clamped to the
    /// cell.
    pub fn border_cells(&self, cell: Cell) -> Vec<Cell> {
        let across = self.border_thickness.min(cell.height);
        let down = self.border_thickness.min(cell.width);
        let top = Cell::new(cell.x, cell.y, cell.width, across);
        let bottom = Cell::new(cell.x, cell.bottom() - across, cell.width, across);
        let left = Cell::new(cell.x, cell.y, down, cell.height);
        let right = Cell::new(cell.right() - down, cell.y, down, cell.height);
        match self.border_type {
            BorderType::None => Vec::new(),
            BorderType::Full => vec![top, bottom, left, right],
            BorderType::Left => vec![left],
            BorderType::Top => vec![top],
            BorderType::Right => vec![right],
            BorderType::Bottom => vec![bottom],
        }
    }

    pub fn to_map(&self) -> Details {
        let mut map = Details::new();
        if let Some(color) = self.background_color {
            map.insert("prop_background_color".into(), color.to_value());
        }
        if self.border_type != BorderType::None {
            map.insert("prop_border_type".into(), json!(self.border_type.name()));
            map.insert("prop_border_thickness".into(), json!(self.border_thickness));
            map.insert("prop_line_style".into(), json!(self.line_style.name()));
            if let Some(color) = self.border_color {
                map.insert("prop_border_color".into(), color.to_value());
            }
        }
        map
    }
}

/// Points to millimeters.
pub(crate) fn pt_to_mm(pt: f64) -> f64 {
    pt * 25.4 / 72.0
}
