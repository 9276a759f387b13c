//! Table markup as a backend reports it.
//!
//! These records mirror what ODF and OOXML actually store: column
//! declarations with repeat counts, and rows of cells with spans and repeat
//! counts. No coordinates appear here; [`TableIndex`](super::TableIndex)
//! derives them.

use crate::document::ElementHandle;

/// A column declaration, possibly standing for several columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMarkup {
    pub element: ElementHandle,
    pub repeat: u32,
}

/// A cell as written in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMarkup {
    pub element: ElementHandle,
    pub colspan: u32,
    pub rowspan: u32,
    pub repeat: u32,
    /// The cell carries content (children or text), as opposed to a
    /// placeholder that only exists to advance the column.
    pub has_content: bool,
}

impl CellMarkup {
    /// A plain 1x1 cell.
    pub fn new(element: ElementHandle, has_content: bool) -> Self {
        Self {
            element,
            colspan: 1,
            rowspan: 1,
            repeat: 1,
            has_content,
        }
    }

    pub fn with_span(mut self, colspan: u32, rowspan: u32) -> Self {
        self.colspan = colspan;
        self.rowspan = rowspan;
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }
}

/// A row declaration, possibly standing for several rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMarkup {
    pub element: ElementHandle,
    pub repeat: u32,
    pub cells: Vec<CellMarkup>,
}

/// Complete structure of a table, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub columns: Vec<ColumnMarkup>,
    pub rows: Vec<RowMarkup>,
}

/// A sheet is a table grid plus free-floating drawing shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetLayout {
    pub grid: TableLayout,
    pub first_shape: Option<ElementHandle>,
}
