//! JSON schema types for the document format.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{Margins, PageNumber};
use crate::props::{BorderType, LineStyle};

/// Top-level JSON document.
#[derive(Debug, Default, Deserialize)]
pub struct JsonDocument {
    #[serde(default)]
    pub config: JsonConfig,
    /// Rows repeated at the top of every page.
    #[serde(default)]
    pub header: Vec<JsonRow>,
    /// Rows repeated at the bottom of every page.
    #[serde(default)]
    pub footer: Vec<JsonRow>,
    /// Body: rows and `{"page": [...]}` groups.
    #[serde(default, deserialize_with = "deserialize_blocks")]
    pub rows: Vec<JsonBlock>,
}

/// Page setup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// "a4" (default), "a5", "letter", "legal", or `{"width": .., "height": ..}`.
    pub page_size: Option<JsonPageSize>,
    /// "portrait" (default) or "landscape".
    pub orientation: Option<String>,
    pub margins: Option<Margins>,
    pub debug: bool,
    pub page_number: Option<PageNumber>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonPageSize {
    Named(String),
    Custom { width: f64, height: f64 },
}

/// A body entry.
#[derive(Debug)]
pub enum JsonBlock {
    Row(JsonRow),
    Page(Vec<JsonRow>),
}

#[derive(Debug, Deserialize)]
pub struct JsonRow {
    /// Height in millimeters.
    pub height: f64,
    #[serde(default)]
    pub cols: Vec<JsonCol>,
    #[serde(default)]
    pub style: Option<JsonCellStyle>,
}

#[derive(Debug, Deserialize)]
pub struct JsonCol {
    /// Grid units (1-12); omitted for an auto column.
    #[serde(default)]
    pub size: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_components")]
    pub components: Vec<JsonComponent>,
    #[serde(default)]
    pub style: Option<JsonCellStyle>,
}

/// A single leaf component.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonComponent {
    Text(JsonText),
    QrCode(JsonCode),
    MatrixCode(JsonCode),
    Barcode(JsonBarcode),
    Image(JsonImage),
    Signature(JsonSignature),
    Line(JsonLine),
}

/// Text with styling.
#[derive(Debug, Deserialize)]
pub struct JsonText {
    pub value: String,
    /// "left" (default), "center", "right".
    #[serde(default)]
    pub align: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Font size in points.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    /// `[r, g, b]`.
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub hyperlink: Option<String>,
}

/// Placement shared by codes and images.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonPlacement {
    pub percent: Option<f64>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub center: bool,
}

/// QR code or matrix code.
#[derive(Debug, Deserialize)]
pub struct JsonCode {
    pub value: String,
    #[serde(flatten)]
    pub placement: JsonPlacement,
}

/// 1D barcode.
#[derive(Debug, Deserialize)]
pub struct JsonBarcode {
    pub value: String,
    /// "code128" (default), "code39", "ean13".
    #[serde(default)]
    pub kind: Option<String>,
    /// Bar height over bar width, e.g. 0.2.
    #[serde(default)]
    pub proportion: Option<f64>,
    #[serde(flatten)]
    pub placement: JsonPlacement,
}

/// Image file, relative to the document.
#[derive(Debug, Deserialize)]
pub struct JsonImage {
    pub path: String,
    #[serde(flatten)]
    pub placement: JsonPlacement,
}

/// Signature slot.
#[derive(Debug, Deserialize)]
pub struct JsonSignature {
    pub value: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_thickness: Option<f64>,
    #[serde(default)]
    pub safe_padding: Option<f64>,
}

/// Separator line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonLine {
    /// "horizontal" (default) or "vertical".
    pub orientation: Option<String>,
    /// "solid" (default) or "dashed".
    pub style: Option<String>,
    pub thickness: Option<f64>,
    pub offset_percent: Option<f64>,
    pub size_percent: Option<f64>,
    pub color: Option<[u8; 3]>,
}

/// Background and border of a row or column.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonCellStyle {
    pub background_color: Option<[u8; 3]>,
    /// "none" (default), "full", "left", "top", "right" or "bottom".
    pub border_type: BorderType,
    pub border_color: Option<[u8; 3]>,
    pub border_thickness: Option<f64>,
    pub line_style: LineStyle,
}

// ============================================================================
// SHORTHAND DESERIALIZATION
// ============================================================================

/// Shorthand keys: (shorthand_key, type_name, target_field).
///
/// A component object without `"type"` is matched against these in order.
/// Example: `{"text": "Hello", "bold": true}` becomes
/// `{"type": "text", "value": "Hello", "bold": true}`.
const SHORTHANDS: &[(&str, &str, &str)] = &[
    ("text", "text", "value"),
    ("qr_code", "qr_code", "value"),
    ("matrix_code", "matrix_code", "value"),
    ("barcode", "barcode", "value"),
    ("image", "image", "path"),
    ("signature", "signature", "value"),
];

/// Rewrite a shorthand object to canonical `{"type": ...}` form.
fn normalize_shorthand(map: &mut Map<String, Value>) -> Result<(), String> {
    if map.contains_key("type") {
        return Ok(());
    }
    for &(key, type_name, field) in SHORTHANDS {
        if let Some(val) = map.remove(key) {
            map.insert("type".into(), Value::String(type_name.into()));
            map.insert(field.into(), val);
            return Ok(());
        }
    }
    Err(format!(
        "component object has no 'type' field and no shorthand key ({})",
        SHORTHANDS
            .iter()
            .map(|(k, _, _)| *k)
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn expect_object<E: serde::de::Error>(
    value: Value,
    context: &str,
    index: usize,
) -> Result<Map<String, Value>, E> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(E::custom(format!(
            "{}[{}]: expected object, got {}",
            context, index, other
        ))),
    }
}

/// Deserialize components, accepting shorthand objects.
fn deserialize_components<'de, D>(deserializer: D) -> Result<Vec<JsonComponent>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<Value> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let mut obj = expect_object::<D::Error>(v, "components", i)?;
            normalize_shorthand(&mut obj)
                .map_err(|e| serde::de::Error::custom(format!("components[{}]: {}", i, e)))?;
            serde_json::from_value(Value::Object(obj))
                .map_err(|e| serde::de::Error::custom(format!("components[{}]: {}", i, e)))
        })
        .collect()
}

/// Deserialize body blocks: `{"page": [ROW...]}` is a page group, anything
/// else a row.
fn deserialize_blocks<'de, D>(deserializer: D) -> Result<Vec<JsonBlock>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<Value> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let mut obj = expect_object::<D::Error>(v, "rows", i)?;
            let block = match obj.remove("page") {
                Some(rows) => serde_json::from_value(rows).map(JsonBlock::Page),
                None => serde_json::from_value(Value::Object(obj)).map(JsonBlock::Row),
            };
            block.map_err(|e| serde::de::Error::custom(format!("rows[{}]: {}", i, e)))
        })
        .collect()
}
