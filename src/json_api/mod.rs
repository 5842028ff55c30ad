//! # JSON API
//!
//! Describe a document as JSON and turn it into a [`Document`].
//!
//! ## Example
//!
//! ```
//! use folio::json_api::JsonDocument;
//!
//! let json = r#"{
//!     "config": {"page_size": "a4"},
//!     "rows": [
//!         {"height": 20, "cols": [
//!             {"size": 8, "components": [{"text": "Invoice", "bold": true}]},
//!             {"size": 4, "components": [{"type": "qr_code", "value": "INV-1", "center": true}]}
//!         ]}
//!     ]
//! }"#;
//!
//! let doc: JsonDocument = serde_json::from_str(json).unwrap();
//! let doc = doc.into_document(std::path::Path::new(".")).unwrap().seal();
//! assert_eq!(doc.structure().unwrap().count("col"), 2);
//! ```

mod convert;
mod schema;

pub use convert::JsonApiError;
pub use schema::{JsonBlock, JsonComponent, JsonConfig, JsonDocument, JsonRow};

use std::path::Path;

use crate::document::Document;
use crate::error::FolioError;

/// Read a JSON document file. Image paths resolve relative to its directory.
pub fn load(path: impl AsRef<Path>) -> Result<Document, FolioError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let doc: JsonDocument = serde_json::from_str(&json)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    tracing::debug!(path = %path.display(), blocks = doc.rows.len(), "loaded document");
    Ok(doc.into_document(base_dir)?)
}
