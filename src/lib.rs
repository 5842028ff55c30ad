//! # Folio - Declarative Document Layout
//!
//! Folio lays out paginated documents described as rows of columns holding
//! content. It provides:
//!
//! - **Geometry engine**: aspect-preserving placement of codes and images
//!   inside their cells, centered or anchored
//! - **Components**: text, QR/matrix/linear codes, images, signatures, lines
//!   arranged on a 12-column grid
//! - **Structure trees**: serializable snapshots of a document for
//!   introspection and golden-file tests
//! - **Providers**: drawing backends receiving absolute cells (a call
//!   recorder and a PNG previewer ship with the crate)
//!
//! ## Quick Start
//!
//! ```
//! use folio::{
//!     components::{Barcode, Col, QrCode, Row, Signature, Text},
//!     config::ConfigBuilder,
//!     document::Document,
//!     provider::RecordingProvider,
//! };
//!
//! let config = ConfigBuilder::new().with_title("Delivery note").build();
//!
//! let doc = Document::new(config)
//!     .add_row(
//!         Row::new(30.0)
//!             .add(Col::new(4).add(QrCode::new("https://example.com/d/42").centered(90.0)))
//!             .add(Col::new(8).add(Text::new("Delivery #42").bold().size(16.0))),
//!     )
//!     .add_row(Barcode::row(15.0, "000042"))
//!     .add_row(Signature::row(25.0, "Received by"))
//!     .seal();
//!
//! let mut provider = RecordingProvider::new();
//! let report = doc.render(&mut provider)?;
//! assert_eq!(report.pages, 1);
//!
//! let structure = doc.structure()?;
//! assert_eq!(structure.count("row"), 3);
//! # Ok::<(), folio::FolioError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`geometry`] | Centered and anchored fitting |
//! | [`components`] | Leaves, columns, rows, pages |
//! | [`document`] | Building, sealing, pagination, rendering |
//! | [`structure`] | Structure trees, diffs, JSON |
//! | [`provider`] | Drawing backends |
//! | [`json_api`] | JSON document format |
//! | [`config`] | Page size, margins, page numbers |
//! | [`props`] | Placement and style properties |
//! | [`error`] | Error types |

pub mod components;
pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod json_api;
pub mod props;
pub mod provider;
pub mod structure;

// Re-exports for convenience
pub use config::Config;
pub use document::{Document, SealedDocument};
pub use error::FolioError;
pub use structure::Structure;
