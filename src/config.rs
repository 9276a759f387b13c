//! Display window for large tables and sheets.
//!
//! Spreadsheets routinely declare a million empty rows. A renderer only wants
//! the part that holds content, and never more than some fixed window. The
//! index itself stays complete; [`SheetWindow::extent`] decides how much of it
//! a caller should walk.
//!
//! # Examples
//!
//! ```rust
//! use docnav::config::SheetWindow;
//! use docnav::table::TableDimensions;
//!
//! // Create with defaults
//! let window = SheetWindow::default();
//! assert_eq!(window.limit, Some(TableDimensions::new(10_000, 500)));
//!
//! // Or customize
//! let window = SheetWindow::new()
//!     .with_limit(TableDimensions::new(100, 20))
//!     .with_limit_by_content(false);
//! ```

use crate::table::{TableDimensions, TableIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetWindow {
    /// Largest extent ever reported; `None` for no cap
    pub limit: Option<TableDimensions>,
    /// Shrink the extent to the cells that hold content
    pub limit_by_content: bool,
}

impl Default for SheetWindow {
    fn default() -> Self {
        Self {
            limit: Some(TableDimensions::new(10_000, 500)),
            limit_by_content: true,
        }
    }
}

impl SheetWindow {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_limit(mut self, limit: TableDimensions) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Remove the cap. Combined with `limit_by_content(false)` this reports
    /// the full declared grid.
    #[inline]
    pub fn without_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    #[inline]
    pub fn with_limit_by_content(mut self, enabled: bool) -> Self {
        self.limit_by_content = enabled;
        self
    }

    /// Rows and columns of `index` a caller should visit, never less than 1x1.
    pub fn extent(&self, index: &TableIndex) -> TableDimensions {
        let mut extent = index.dimensions();

        if self.limit_by_content {
            let window = self.limit.unwrap_or(extent).to_range();
            let bounds = index.content_bounds_within(window);
            extent = TableDimensions::new(bounds.to().row(), bounds.to().column());
        }
        if let Some(limit) = self.limit {
            extent.rows = extent.rows.min(limit.rows);
            extent.columns = extent.columns.min(limit.columns);
        }

        TableDimensions::new(extent.rows.max(1), extent.columns.max(1))
    }
}
