//! # Declarative Components
//!
//! Builder-style components for laying out documents.
//!
//! ## Design Philosophy
//!
//! Instead of positioning every element by hand, you describe rows of columns
//! holding content, and the render pass works out where everything goes:
//!
//! ```
//! use std::sync::Arc;
//! use folio::components::*;
//! use folio::config::Config;
//!
//! let mut row = Row::new(30.0)
//!     .add(Col::new(4).add(QrCode::new("https://example.com").centered(80.0)))
//!     .add(Col::new(8).add(Text::new("Scan to visit").bold()));
//! row.set_config(Arc::new(Config::default()));
//!
//! let structure = row.structure()?;
//! assert_eq!(structure.children.len(), 2);
//! # Ok::<(), folio::FolioError>(())
//! ```
//!
//! ## Layout
//!
//! ```text
//! Row (declared height, full content width)
//!  ├─ Col (size/12 of the row width, or an even share of what is left)
//!  │   ├─ Component ─┐
//!  │   └─ Component ─┴─ each receives the column's cell
//!  └─ Col
//! ```
//!
//! Leaves with a natural aspect ratio (codes, images) fit themselves into the
//! column cell with the [geometry engine](crate::geometry).
//!
//! ## Component Trait
//!
//! Every leaf implements [`Component`]: render into a provider, export a
//! structure node, and receive the document configuration exactly once.

mod barcode;
mod graphics;
mod layout;
mod text;

pub use barcode::*;
pub use graphics::*;
pub use layout::*;
pub use text::*;

use std::sync::Arc;

use crate::config::Config;
use crate::entity::Cell;
use crate::error::FolioError;
use crate::provider::Provider;
use crate::structure::Structure;

/// Trait for leaf components.
///
/// A component is unconfigured until [`Component::set_config`] has been
/// called; rendering or exporting its structure before that fails with
/// [`FolioError::NotConfigured`].
pub trait Component: Send + Sync {
    /// Draw this component into `cell` (absolute, in mm).
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError>;

    /// Export this component as a structure node.
    fn structure(&self) -> Result<Structure, FolioError>;

    /// Receive the document configuration.
    fn set_config(&mut self, config: Arc<Config>);

    fn is_configured(&self) -> bool;
}

// Allow boxed components
impl Component for Box<dyn Component> {
    fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        self.as_ref().render(provider, cell)
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        self.as_ref().structure()
    }

    fn set_config(&mut self, config: Arc<Config>) {
        self.as_mut().set_config(config);
    }

    fn is_configured(&self) -> bool {
        self.as_ref().is_configured()
    }
}

/// The configuration of a node, or `NotConfigured` naming the node type.
pub(crate) fn configured<'a>(
    config: &'a Option<Arc<Config>>,
    kind: &'static str,
) -> Result<&'a Config, FolioError> {
    config.as_deref().ok_or(FolioError::NotConfigured(kind))
}
