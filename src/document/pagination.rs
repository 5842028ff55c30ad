//! Flowing rows onto pages.
//!
//! ```text
//! ┌──────────────────────┐
//! │ margin top           │
//! │ header rows          │  cursor starts below the header
//! │ ┌──────────────────┐ │
//! │ │ row              │ │
//! │ │ row              │ │  a row that does not fit before the
//! │ │                  │ │  footer starts the next page
//! │ └──────────────────┘ │
//! │ footer rows          │
//! │ margin bottom        │
//! └──────────────────────┘
//! ```

use super::Block;
use crate::components::Row;
use crate::config::Config;

/// Tolerance for rows that fill a page exactly.
const EPSILON: f64 = 1e-9;

/// A row placed on a page at an absolute Y.
#[derive(Clone, Copy)]
pub struct PlacedRow<'a> {
    pub y: f64,
    pub row: &'a Row,
}

/// The body rows of one page.
#[derive(Clone)]
pub struct PageLayout<'a> {
    /// Zero-based page index.
    pub index: usize,
    pub rows: Vec<PlacedRow<'a>>,
}

impl<'a> PageLayout<'a> {
    fn new(index: usize) -> Self {
        Self {
            index,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Y just below the last row, or `None` for an empty page.
    pub fn bottom(&self) -> Option<f64> {
        self.rows.last().map(|placed| placed.y + placed.row.height())
    }
}

/// Vertical band available to body rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Band {
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    pub fn new(config: &Config, header_height: f64, footer_height: f64) -> Self {
        Self {
            top: config.margins.top + header_height,
            bottom: config.page_size.height - config.margins.bottom - footer_height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

struct Paginator<'a> {
    band: Band,
    pages: Vec<PageLayout<'a>>,
    cursor: f64,
}

impl<'a> Paginator<'a> {
    fn new(band: Band) -> Self {
        Self {
            band,
            pages: vec![PageLayout::new(0)],
            cursor: band.top,
        }
    }

    fn current(&mut self) -> &mut PageLayout<'a> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page(&mut self) {
        let index = self.pages.len();
        self.pages.push(PageLayout::new(index));
        self.cursor = self.band.top;
    }

    fn place(&mut self, row: &'a Row) {
        let height = row.height();
        if self.cursor + height > self.band.bottom + EPSILON && !self.current().is_empty() {
            self.break_page();
        }
        if height > self.band.height() + EPSILON {
            tracing::warn!(
                page = self.pages.len(),
                height,
                available = self.band.height(),
                "row taller than the page body, placed alone"
            );
        }
        let y = self.cursor;
        self.current().rows.push(PlacedRow { y, row });
        self.cursor += height;
    }
}

/// Distribute `blocks` over pages.
///
/// There is always at least one page. An explicit page block starts a fresh
/// page unless the current one is still empty.
pub(crate) fn paginate<'a>(band: Band, blocks: &'a [Block]) -> Vec<PageLayout<'a>> {
    if band.height() <= 0.0 {
        tracing::warn!(?band, "header and footer leave no room for body rows");
    }

    let mut paginator = Paginator::new(band);
    for block in blocks {
        match block {
            Block::Row(row) => paginator.place(row),
            Block::Page(page) => {
                if !paginator.current().is_empty() {
                    paginator.break_page();
                }
                for row in page.rows() {
                    paginator.place(row);
                }
            }
        }
    }
    paginator.pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Page;

    const BAND: Band = Band {
        top: 10.0,
        bottom: 110.0,
    };

    fn rows(heights: &[f64]) -> Vec<Block> {
        heights.iter().map(|&h| Block::Row(Row::new(h))).collect()
    }

    fn layout(pages: &[PageLayout<'_>]) -> Vec<Vec<f64>> {
        pages
            .iter()
            .map(|page| page.rows.iter().map(|placed| placed.y).collect())
            .collect()
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = paginate(BAND, &[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_rows_stack_from_band_top() {
        let blocks = rows(&[20.0, 30.0, 10.0]);
        let pages = paginate(BAND, &blocks);
        assert_eq!(layout(&pages), vec![vec![10.0, 30.0, 60.0]]);
        assert_eq!(pages[0].bottom(), Some(70.0));
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let blocks = rows(&[50.0, 50.0]);
        assert_eq!(paginate(BAND, &blocks).len(), 1);
    }

    #[test]
    fn test_overflow_breaks_page() {
        let blocks = rows(&[60.0, 50.0, 10.0]);
        let pages = paginate(BAND, &blocks);
        assert_eq!(layout(&pages), vec![vec![10.0], vec![10.0, 60.0]]);
        assert_eq!(pages[1].index, 1);
    }

    #[test]
    fn test_oversize_row_alone() {
        let blocks = rows(&[10.0, 150.0, 10.0]);
        let pages = paginate(BAND, &blocks);
        assert_eq!(layout(&pages), vec![vec![10.0], vec![10.0], vec![10.0]]);
    }

    #[test]
    fn test_explicit_page_starts_fresh() {
        let blocks = vec![
            Block::Row(Row::new(10.0)),
            Block::Page(Page::new().add(Row::new(10.0))),
            Block::Row(Row::new(10.0)),
        ];
        let pages = paginate(BAND, &blocks);
        assert_eq!(layout(&pages), vec![vec![10.0], vec![10.0, 20.0]]);
    }

    #[test]
    fn test_explicit_page_on_empty_page() {
        let blocks = vec![Block::Page(Page::new().add(Row::new(10.0)))];
        assert_eq!(paginate(BAND, &blocks).len(), 1);
    }
}
