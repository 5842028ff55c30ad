//! # Documents
//!
//! A [`Document`] collects rows, explicit pages and optional header/footer
//! rows. Sealing it broadcasts the configuration to every node once and
//! yields a [`SealedDocument`], which can be rendered and exported any
//! number of times, from any thread.
//!
//! ```
//! use folio::components::{Col, Row, Text};
//! use folio::config::Config;
//! use folio::document::Document;
//! use folio::provider::RecordingProvider;
//!
//! let doc = Document::new(Config::default())
//!     .register_header(vec![Text::row(10.0, "ACME Corp")])
//!     .add_row(Row::new(20.0).add(Col::new(6).add(Text::new("Invoice 42"))))
//!     .seal();
//!
//! let mut provider = RecordingProvider::new();
//! let report = doc.render(&mut provider).unwrap();
//! assert_eq!(report.pages, 1);
//! assert_eq!(doc.structure().unwrap().children[0].kind, "header");
//! ```

mod pagination;

pub use pagination::{PageLayout, PlacedRow};

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;

use crate::components::{Page, Row};
use crate::config::Config;
use crate::entity::Cell;
use crate::error::FolioError;
use crate::props::Details;
use crate::provider::Provider;
use crate::structure::Structure;
use pagination::{Band, paginate};

/// A top-level entry of a document body.
pub enum Block {
    Row(Row),
    Page(Page),
}

impl Block {
    fn set_config(&mut self, config: Arc<Config>) {
        match self {
            Block::Row(row) => row.set_config(config),
            Block::Page(page) => page.set_config(config),
        }
    }

    fn structure(&self) -> Result<Structure, FolioError> {
        match self {
            Block::Row(row) => row.structure(),
            Block::Page(page) => page.structure(),
        }
    }
}

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenderReport {
    pub pages: usize,
    /// Body rows rendered, headers and footers excluded.
    pub rows: usize,
}

// ============================================================================
// DOCUMENT (BUILDING)
// ============================================================================

/// A document under construction.
pub struct Document {
    config: Config,
    header: Vec<Row>,
    footer: Vec<Row>,
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            header: Vec::new(),
            footer: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn add_row(mut self, row: Row) -> Self {
        self.blocks.push(Block::Row(row));
        self
    }

    pub fn add_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.blocks.extend(rows.into_iter().map(Block::Row));
        self
    }

    /// Add a group of rows that starts on a fresh page.
    pub fn add_page(mut self, page: Page) -> Self {
        self.blocks.push(Block::Page(page));
        self
    }

    /// Rows repeated at the top of every page. Replaces any earlier header.
    pub fn register_header(mut self, rows: Vec<Row>) -> Self {
        self.header = rows;
        self
    }

    /// Rows repeated at the bottom of every page. Replaces any earlier footer.
    pub fn register_footer(mut self, rows: Vec<Row>) -> Self {
        self.footer = rows;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Broadcast the configuration to every node and freeze the tree.
    pub fn seal(self) -> SealedDocument {
        let config = Arc::new(self.config);
        let mut header = self.header;
        let mut footer = self.footer;
        let mut blocks = self.blocks;

        for row in header.iter_mut().chain(footer.iter_mut()) {
            row.set_config(Arc::clone(&config));
        }
        for block in &mut blocks {
            block.set_config(Arc::clone(&config));
        }

        tracing::debug!(
            blocks = blocks.len(),
            header = header.len(),
            footer = footer.len(),
            "document sealed"
        );

        SealedDocument {
            config,
            header,
            footer,
            blocks,
        }
    }
}

// ============================================================================
// SEALED DOCUMENT
// ============================================================================

/// A configured, immutable document.
pub struct SealedDocument {
    config: Arc<Config>,
    header: Vec<Row>,
    footer: Vec<Row>,
    blocks: Vec<Block>,
}

fn total_height(rows: &[Row]) -> f64 {
    rows.iter().map(Row::height).sum()
}

impl SealedDocument {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn header_height(&self) -> f64 {
        total_height(&self.header)
    }

    pub fn footer_height(&self) -> f64 {
        total_height(&self.footer)
    }

    fn band(&self) -> Band {
        Band::new(&self.config, self.header_height(), self.footer_height())
    }

    /// Body rows distributed over pages.
    pub fn pages(&self) -> Vec<PageLayout<'_>> {
        paginate(self.band(), &self.blocks)
    }

    /// Full-width cell for a row whose top edge is at `y`.
    fn row_cell(&self, row: &Row, y: f64) -> Cell {
        Cell::new(self.config.margins.left, y, self.config.content_width(), row.height())
    }

    /// Draw every page into `provider`.
    ///
    /// Stops at the first provider error and returns it unchanged.
    pub fn render(&self, provider: &mut dyn Provider) -> Result<RenderReport, FolioError> {
        let pages = self.pages();
        let total = pages.len();
        let mut report = RenderReport {
            pages: total,
            rows: 0,
        };

        for page in &pages {
            tracing::debug!(page = page.index + 1, total, rows = page.rows.len(), "render page");
            provider.add_page(page.index)?;

            let mut y = self.config.margins.top;
            for row in &self.header {
                row.render(provider, self.row_cell(row, y))?;
                y += row.height();
            }

            for placed in &page.rows {
                placed.row.render(provider, self.row_cell(placed.row, placed.y))?;
            }
            report.rows += page.rows.len();

            let mut y = self.band().bottom;
            for row in &self.footer {
                row.render(provider, self.row_cell(row, y))?;
                y += row.height();
            }

            if let Some(page_number) = &self.config.page_number {
                provider.add_text(
                    &page_number.label(page.index + 1, total),
                    page_number.cell(&self.config),
                    &page_number.text_prop(),
                )?;
            }
        }

        Ok(report)
    }

    fn details(&self) -> Details {
        let config = &self.config;
        let mut details = Details::new();
        details.insert("page_width".into(), json!(config.page_size.width));
        details.insert("page_height".into(), json!(config.page_size.height));
        details.insert("margin_left".into(), json!(config.margins.left));
        details.insert("margin_top".into(), json!(config.margins.top));
        details.insert("margin_right".into(), json!(config.margins.right));
        details.insert("margin_bottom".into(), json!(config.margins.bottom));
        if let Some(title) = &config.title {
            details.insert("title".into(), json!(title));
        }
        if let Some(author) = &config.author {
            details.insert("author".into(), json!(author));
        }
        if let Some(date) = config.creation_date {
            details.insert("creation_date".into(), json!(date.to_rfc3339()));
        }
        details
    }

    /// The declared tree: header, body blocks in declaration order, footer.
    ///
    /// Independent of pagination, so identical before and after rendering.
    pub fn structure(&self) -> Result<Structure, FolioError> {
        let mut root = Structure::new("document").with_details(self.details());
        if let Some(header) = rows_node("header", &self.header)? {
            root.push(header);
        }
        for block in &self.blocks {
            root.push(block.structure()?);
        }
        if let Some(footer) = rows_node("footer", &self.footer)? {
            root.push(footer);
        }
        Ok(root)
    }

    /// One tree per printed page, with the Y of every body row.
    pub fn page_structures(&self) -> Result<Vec<Structure>, FolioError> {
        let pages = self.pages();
        let total = pages.len();
        pages
            .par_iter()
            .map(|page| -> Result<Structure, FolioError> {
                let mut node = Structure::new("page")
                    .with_value(format!("{}/{}", page.index + 1, total));
                if let Some(header) = rows_node("header", &self.header)? {
                    node.push(header);
                }
                for placed in &page.rows {
                    node.push(placed.row.structure()?.with_detail("y", placed.y));
                }
                if let Some(footer) = rows_node("footer", &self.footer)? {
                    node.push(footer);
                }
                Ok(node)
            })
            .collect()
    }
}

/// A `kind` node wrapping `rows`, or nothing when there are none.
fn rows_node(kind: &str, rows: &[Row]) -> Result<Option<Structure>, FolioError> {
    if rows.is_empty() {
        return Ok(None);
    }
    let children = rows.iter().map(Row::structure).collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Structure::new(kind).with_children(children)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Col, QrCode, Text};
    use crate::config::{ConfigBuilder, Margins, PageNumber, PageSize, Place};
    use crate::provider::{ProviderCall, RecordingProvider};

    fn small_config() -> Config {
        ConfigBuilder::new()
            .with_page_size(PageSize {
                width: 100.0,
                height: 100.0,
            })
            .with_margins(Margins::uniform(10.0))
            .build()
    }

    fn text_row(height: f64, value: &str) -> Row {
        Row::new(height).add(Col::auto().add(Text::new(value)))
    }

    #[test]
    fn test_seal_configures_every_node() {
        let doc = Document::new(small_config())
            .register_header(vec![text_row(5.0, "h")])
            .add_row(text_row(10.0, "a"))
            .add_page(Page::new().add(text_row(10.0, "b")))
            .seal();

        assert!(doc.header.iter().all(Row::is_configured));
        assert!(doc.blocks.iter().all(|block| match block {
            Block::Row(row) => row.is_configured(),
            Block::Page(page) => page.is_configured(),
        }));
    }

    #[test]
    fn test_render_order_and_positions() {
        let doc = Document::new(small_config())
            .register_header(vec![text_row(5.0, "header")])
            .register_footer(vec![text_row(5.0, "footer")])
            .add_row(text_row(20.0, "first"))
            .add_row(text_row(30.0, "second"))
            .seal();

        let mut provider = RecordingProvider::new();
        let report = doc.render(&mut provider).unwrap();
        assert_eq!(report, RenderReport { pages: 1, rows: 2 });

        let texts: Vec<(String, f64)> = provider
            .calls()
            .iter()
            .filter_map(|call| match call {
                ProviderCall::Text { text, cell, .. } => Some((text.clone(), cell.y)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("header".to_string(), 10.0),
                ("first".to_string(), 15.0),
                ("second".to_string(), 35.0),
                ("footer".to_string(), 85.0),
            ]
        );
    }

    #[test]
    fn test_rows_break_before_footer() {
        // band is 15..85, 70mm tall
        let doc = Document::new(small_config())
            .register_header(vec![text_row(5.0, "h")])
            .register_footer(vec![text_row(5.0, "f")])
            .add_rows((0..5).map(|i| text_row(20.0, &i.to_string())))
            .seal();

        let pages = doc.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows.len(), 3);
        assert_eq!(pages[0].bottom(), Some(75.0));
        assert_eq!(pages[1].rows[0].y, 15.0);
    }

    #[test]
    fn test_page_numbers() {
        let config = ConfigBuilder::new()
            .with_page_number(PageNumber::new("{current} of {total}", Place::Bottom))
            .build();
        let doc = Document::new(config)
            .add_row(text_row(10.0, "a"))
            .add_page(Page::new().add(text_row(10.0, "b")))
            .seal();

        let mut provider = RecordingProvider::new();
        doc.render(&mut provider).unwrap();

        let labels: Vec<_> = provider
            .calls()
            .iter()
            .filter_map(|call| match call {
                ProviderCall::Text { text, .. } if text.contains(" of ") => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["1 of 2", "2 of 2"]);
    }

    #[test]
    fn test_provider_error_stops_render() {
        let doc = Document::new(small_config())
            .add_row(Row::new(10.0).add(Col::new(12).add(QrCode::new("x"))))
            .add_row(text_row(10.0, "after"))
            .seal();

        let mut provider = RecordingProvider::failing_on("qrcode");
        let err = doc.render(&mut provider).unwrap_err();
        assert!(matches!(err, FolioError::Provider(_)));
        assert_eq!(provider.cells_of("text"), vec![]);
    }

    #[test]
    fn test_structure_layout() {
        let doc = Document::new(small_config())
            .register_header(vec![text_row(5.0, "h")])
            .register_footer(vec![text_row(5.0, "f")])
            .add_row(text_row(10.0, "a"))
            .add_page(Page::new().add(text_row(10.0, "b")))
            .seal();

        let structure = doc.structure().unwrap();
        let kinds: Vec<_> = structure.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["header", "row", "page", "footer"]);
        assert_eq!(structure.details["page_width"], json!(100.0));
        assert_eq!(structure.details["margin_top"], json!(10.0));
    }

    #[test]
    fn test_structure_stable_across_render() {
        let doc = Document::new(small_config())
            .add_rows((0..8).map(|i| text_row(25.0, &format!("row {i}"))))
            .seal();

        let before = doc.structure().unwrap();
        doc.render(&mut RecordingProvider::new()).unwrap();
        assert_eq!(doc.structure().unwrap(), before);
    }

    #[test]
    fn test_page_structures() {
        let doc = Document::new(small_config())
            .add_rows((0..5).map(|i| text_row(30.0, &i.to_string())))
            .seal();

        let pages = doc.page_structures().unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].value, "1/3");
        assert_eq!(pages[0].children.len(), 2);
        assert_eq!(pages[1].children[0].details["y"], json!(10.0));
        assert_eq!(pages[2].children.len(), 1);
    }

    #[test]
    fn test_sealed_document_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SealedDocument>();
    }
}
