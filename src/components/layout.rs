//! # Layout Containers
//!
//! Rows split the content width into columns on a 12-unit grid; columns hold
//! leaf components; pages group rows that must start on a fresh page.
//!
//! ```text
//! Row width 190, cols [4, auto, 2]
//!
//! ├──── 4/12 ────┼──────── auto ────────┼─ 2/12 ─┤
//!   63.33          95.00                  31.67
//! ```

use std::sync::Arc;

use super::{Component, configured};
use crate::config::Config;
use crate::entity::Cell;
use crate::error::FolioError;
use crate::props::CellStyle;
use crate::provider::Provider;
use crate::structure::Structure;

/// Number of grid units in a row.
pub const GRID_SIZE: u8 = 12;

// ============================================================================
// COL
// ============================================================================

/// A column: a share of its row's width holding any number of components.
///
/// ## Example
///
/// ```
/// use folio::components::{Col, Text};
///
/// let half = Col::new(6).add(Text::new("left half"));
/// let rest = Col::auto().add(Text::new("whatever is left"));
/// ```
pub struct Col {
    size: Option<u8>,
    components: Vec<Box<dyn Component>>,
    style: Option<CellStyle>,
    config: Option<Arc<Config>>,
}

impl Col {
    /// A column spanning `size` grid units. 0 and sizes over 12 span the full
    /// row.
    pub fn new(size: u8) -> Self {
        let size = if size == 0 || size > GRID_SIZE {
            GRID_SIZE
        } else {
            size
        };
        Self {
            size: Some(size),
            components: Vec::new(),
            style: None,
            config: None,
        }
    }

    /// A column sharing the width left over by sized columns.
    pub fn auto() -> Self {
        Self {
            size: None,
            components: Vec::new(),
            style: None,
            config: None,
        }
    }

    pub fn add(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn add_all(mut self, components: impl IntoIterator<Item = Box<dyn Component>>) -> Self {
        self.components.extend(components);
        self
    }

    /// Background and border drawn behind the column's components.
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style.make_valid());
        self
    }

    pub fn style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    /// Grid size, `None` for auto columns.
    pub fn size(&self) -> Option<u8> {
        self.size
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn set_config(&mut self, config: Arc<Config>) {
        for component in &mut self.components {
            component.set_config(Arc::clone(&config));
        }
        self.config = Some(config);
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some() && self.components.iter().all(|c| c.is_configured())
    }

    /// Render every component into `cell`, in declaration order.
    pub fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        let config = configured(&self.config, "col")?;
        if let Some(style) = &self.style {
            provider.add_cell_style(cell, style)?;
        }
        if config.debug {
            provider.add_debug_border(cell)?;
        }
        for component in &self.components {
            component.render(provider, cell)?;
        }
        Ok(())
    }

    pub fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "col")?;
        let mut node = match self.size {
            Some(size) => Structure::new("col").with_value(size),
            None => Structure::new("col").with_detail("is_max", true),
        };
        if let Some(style) = &self.style {
            node.details.extend(style.to_map());
        }
        let children = self
            .components
            .iter()
            .map(|c| c.structure())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(node.with_children(children))
    }
}

// ============================================================================
// ROW
// ============================================================================

/// A horizontal band of fixed height spanning the content width.
///
/// ## Example
///
/// ```
/// use folio::components::{Col, Row, Text};
///
/// let row = Row::new(12.0)
///     .add(Col::new(8).add(Text::new("Description")))
///     .add(Col::new(4).add(Text::new("Amount").right()));
///
/// let widths: Vec<f64> = row.col_widths(120.0);
/// assert_eq!(widths, vec![80.0, 40.0]);
/// ```
pub struct Row {
    height: f64,
    cols: Vec<Col>,
    style: Option<CellStyle>,
    config: Option<Arc<Config>>,
}

impl Row {
    /// A row of `height` mm. Negative or non-finite heights become 0.
    pub fn new(height: f64) -> Self {
        let height = if height.is_finite() && height > 0.0 {
            height
        } else {
            0.0
        };
        Self {
            height,
            cols: Vec::new(),
            style: None,
            config: None,
        }
    }

    pub fn add(mut self, col: Col) -> Self {
        self.cols.push(col);
        self
    }

    pub fn add_all(mut self, cols: impl IntoIterator<Item = Col>) -> Self {
        self.cols.extend(cols);
        self
    }

    /// Background and border drawn across the full row before its columns.
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style.make_valid());
        self
    }

    pub fn style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn cols(&self) -> &[Col] {
        &self.cols
    }

    /// Width of each column for a row `width` mm wide.
    ///
    /// Sized columns take `size / 12` of the width; auto columns split what
    /// is left evenly, or get nothing when sized columns already overflow.
    pub fn col_widths(&self, width: f64) -> Vec<f64> {
        let unit = width / GRID_SIZE as f64;
        let explicit: f64 = self
            .cols
            .iter()
            .filter_map(Col::size)
            .map(|size| size as f64 * unit)
            .sum();
        let autos = self.cols.iter().filter(|c| c.size().is_none()).count();
        let auto_width = if autos > 0 {
            (width - explicit).max(0.0) / autos as f64
        } else {
            0.0
        };

        self.cols
            .iter()
            .map(|col| match col.size() {
                Some(size) => size as f64 * unit,
                None => auto_width,
            })
            .collect()
    }

    /// Absolute cell of each column when the row occupies `cell`.
    pub fn col_cells(&self, cell: Cell) -> Vec<Cell> {
        let mut x = cell.x;
        self.col_widths(cell.width)
            .into_iter()
            .map(|width| {
                let col = Cell::new(x, cell.y, width, cell.height);
                x += width;
                col
            })
            .collect()
    }

    pub fn set_config(&mut self, config: Arc<Config>) {
        for col in &mut self.cols {
            col.set_config(Arc::clone(&config));
        }
        self.config = Some(config);
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some() && self.cols.iter().all(Col::is_configured)
    }

    /// Render the row at the top-left of `cell`, which gives the row width.
    /// The row's own height replaces `cell.height`.
    pub fn render(&self, provider: &mut dyn Provider, cell: Cell) -> Result<(), FolioError> {
        configured(&self.config, "row")?;
        let cell = Cell::new(cell.x, cell.y, cell.width, self.height);
        tracing::trace!(y = cell.y, height = cell.height, cols = self.cols.len(), "render row");
        if let Some(style) = &self.style {
            provider.add_cell_style(cell, style)?;
        }
        for (col, col_cell) in self.cols.iter().zip(self.col_cells(cell)) {
            col.render(provider, col_cell)?;
        }
        Ok(())
    }

    pub fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "row")?;
        let mut node = Structure::new("row").with_value(self.height);
        if let Some(style) = &self.style {
            node.details.extend(style.to_map());
        }
        let children = self.cols.iter().map(Col::structure).collect::<Result<Vec<_>, _>>()?;
        Ok(node.with_children(children))
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// A group of rows that always starts on a fresh page.
#[derive(Default)]
pub struct Page {
    rows: Vec<Row>,
    config: Option<Arc<Config>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn add_all(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn set_config(&mut self, config: Arc<Config>) {
        for row in &mut self.rows {
            row.set_config(Arc::clone(&config));
        }
        self.config = Some(config);
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some() && self.rows.iter().all(Row::is_configured)
    }

    pub fn structure(&self) -> Result<Structure, FolioError> {
        configured(&self.config, "page")?;
        let rows = self.rows.iter().map(Row::structure).collect::<Result<Vec<_>, _>>()?;
        Ok(Structure::new("page").with_children(rows))
    }
}
