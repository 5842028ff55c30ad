//! # Document Configuration
//!
//! Page geometry and global settings, broadcast once to every node of a
//! document when it is sealed.
//!
//! ## Usage
//!
//! ```
//! use folio::config::{ConfigBuilder, PageNumber, PageSize, Place};
//!
//! let config = ConfigBuilder::new()
//!     .with_page_size(PageSize::A4)
//!     .with_debug(true)
//!     .with_page_number(PageNumber::new("{current} / {total}", Place::RightBottom))
//!     .build();
//!
//! assert_eq!(config.content_width(), 190.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Cell;
use crate::geometry::center_correction;
use crate::props::{Align, TextProp, pt_to_mm};

/// # Page Size
///
/// Physical page dimensions in millimeters.
///
/// | Name | Width | Height |
/// |------|-------|--------|
/// | A4 | 210 | 297 |
/// | A5 | 148 | 210 |
/// | Letter | 215.9 | 279.4 |
/// | Legal | 215.9 | 355.6 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: Self = Self {
        width: 210.0,
        height: 297.0,
    };

    pub const A5: Self = Self {
        width: 148.0,
        height: 210.0,
    };

    pub const LETTER: Self = Self {
        width: 215.9,
        height: 279.4,
    };

    pub const LEGAL: Self = Self {
        width: 215.9,
        height: 355.6,
    };

    /// Look up a named size ("a4", "a5", "letter", "legal").
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(Self::A4),
            "a5" => Some(Self::A5),
            "letter" => Some(Self::LETTER),
            "legal" => Some(Self::LEGAL),
            _ => None,
        }
    }

    /// The same page turned sideways.
    pub fn landscape(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Where the page number is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    LeftTop,
    Top,
    RightTop,
    LeftBottom,
    Bottom,
    #[default]
    RightBottom,
}

impl Place {
    fn is_top(&self) -> bool {
        matches!(self, Place::LeftTop | Place::Top | Place::RightTop)
    }

    fn align(&self) -> Align {
        match self {
            Place::LeftTop | Place::LeftBottom => Align::Left,
            Place::Top | Place::Bottom => Align::Center,
            Place::RightTop | Place::RightBottom => Align::Right,
        }
    }
}

/// Page number template. `{current}` and `{total}` are substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageNumber {
    pub pattern: String,
    pub place: Place,
    /// Font size in points.
    pub size: f64,
}

impl Default for PageNumber {
    fn default() -> Self {
        Self {
            pattern: "{current}/{total}".into(),
            place: Place::RightBottom,
            size: 10.0,
        }
    }
}

impl PageNumber {
    pub fn new(pattern: impl Into<String>, place: Place) -> Self {
        Self {
            pattern: pattern.into(),
            place,
            ..Default::default()
        }
    }

    /// Substitute the placeholders.
    pub fn label(&self, current: usize, total: usize) -> String {
        self.pattern
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }

    pub fn text_prop(&self) -> TextProp {
        TextProp {
            align: self.place.align(),
            size: self.size,
            ..Default::default()
        }
        .make_valid()
    }

    /// Cell of the label: one text line, vertically centered in the top or
    /// bottom margin strip and spanning the content width.
    pub fn cell(&self, config: &Config) -> Cell {
        let line = pt_to_mm(self.text_prop().size);
        let (strip_y, strip_height) = if self.place.is_top() {
            (0.0, config.margins.top)
        } else {
            (
                config.page_size.height - config.margins.bottom,
                config.margins.bottom,
            )
        };
        let y = if strip_height > line {
            strip_y + center_correction(strip_height, line)
        } else if self.place.is_top() {
            strip_y
        } else {
            config.page_size.height - line
        };
        Cell::new(config.margins.left, y, config.content_width(), line)
    }
}

/// # Document Configuration
///
/// Shared by every node of a sealed document through an `Arc`.
///
/// ## Content Area
///
/// ```text
/// ┌─────────────── page width ───────────────┐
/// │                 top                      │
/// │ left ┌──── content width ─────┐ right    │
/// │      │                        │          │
/// │      │     content height     │          │
/// │      └────────────────────────┘          │
/// │                bottom                    │
/// └──────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Draw a border around every column.
    pub debug: bool,
    pub page_number: Option<PageNumber>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

impl Config {
    /// Width available to rows.
    #[inline]
    pub fn content_width(&self) -> f64 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Height available to rows, headers and footers included.
    #[inline]
    pub fn content_height(&self) -> f64 {
        self.page_size.height - self.margins.top - self.margins.bottom
    }

    /// The content area as an absolute cell.
    pub fn content_cell(&self) -> Cell {
        Cell::new(
            self.margins.left,
            self.margins.top,
            self.content_width(),
            self.content_height(),
        )
    }
}

/// Builder for [`Config`]. Invalid values are clamped rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    page_size: PageSize,
    margins: Margins,
    debug: bool,
    page_number: Option<PageNumber>,
    title: Option<String>,
    author: Option<String>,
    creation_date: Option<DateTime<Utc>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-positive sizes are ignored.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        if size.width > 0.0 && size.height > 0.0 {
            self.page_size = size;
        }
        self
    }

    /// Negative margins are clamped to zero.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Margins {
            left: margins.left.max(0.0),
            top: margins.top.max(0.0),
            right: margins.right.max(0.0),
            bottom: margins.bottom.max(0.0),
        };
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_page_number(mut self, page_number: PageNumber) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Finish the configuration. Margins that leave no content area fall
    /// back to the defaults.
    pub fn build(self) -> Config {
        let mut margins = self.margins;
        if margins.left + margins.right >= self.page_size.width
            || margins.top + margins.bottom >= self.page_size.height
        {
            tracing::warn!(?margins, "margins leave no content area, using defaults");
            margins = Margins::default();
        }

        Config {
            page_size: self.page_size,
            margins,
            debug: self.debug,
            page_number: self.page_number,
            title: self.title,
            author: self.author,
            creation_date: self.creation_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_area() {
        let config = Config::default();
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.content_width(), 190.0);
        assert_eq!(config.content_height(), 277.0);
        assert_eq!(config.content_cell(), Cell::new(10.0, 10.0, 190.0, 277.0));
    }

    #[test]
    fn test_negative_margins_clamped() {
        let config = ConfigBuilder::new()
            .with_margins(Margins {
                left: -5.0,
                top: 20.0,
                right: 5.0,
                bottom: -1.0,
            })
            .build();
        assert_eq!(config.margins.left, 0.0);
        assert_eq!(config.margins.bottom, 0.0);
        assert_eq!(config.content_width(), 205.0);
    }

    #[test]
    fn test_oversized_margins_fall_back() {
        let config = ConfigBuilder::new()
            .with_margins(Margins::uniform(150.0))
            .build();
        assert_eq!(config.margins, Margins::default());
    }

    #[test]
    fn test_page_size_lookup() {
        assert_eq!(PageSize::by_name("Letter"), Some(PageSize::LETTER));
        assert_eq!(PageSize::by_name("b5"), None);
        assert_eq!(PageSize::A4.landscape().width, 297.0);
    }

    #[test]
    fn test_page_number_label() {
        let number = PageNumber::new("Page {current} of {total}", Place::Bottom);
        assert_eq!(number.label(2, 7), "Page 2 of 7");
        assert_eq!(number.text_prop().align, Align::Center);
    }

    #[test]
    fn test_page_number_cell_in_bottom_margin() {
        let config = ConfigBuilder::new()
            .with_margins(Margins::uniform(20.0))
            .build();
        let number = PageNumber::default();
        let cell = number.cell(&config);
        let line = pt_to_mm(10.0);
        assert_eq!(cell.x, 20.0);
        assert_eq!(cell.width, 170.0);
        assert!((cell.y - (277.0 + (20.0 - line) / 2.0)).abs() < 1e-9);
    }
}
