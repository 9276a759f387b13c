//! Tables and sheets as random-access grids.
//!
//! Office formats store tables row by row, compressing runs of identical rows
//! and cells with repeat counts and describing merged cells with spans. This
//! module turns that markup into coordinates:
//!
//! - [`position`]: spreadsheet labels (`"A1"`, `"B2:D5"`) and their codec
//! - [`TableCursor`]: the running coordinate while markup is read
//! - [`TableIndex`]: the grid built from one pass over a [`TableLayout`]

pub mod cursor;
pub mod index;
pub mod layout;
pub mod position;

pub use cursor::TableCursor;
pub use index::{CellRef, ColumnRef, RowRef, TableIndex};
pub use layout::{CellMarkup, ColumnMarkup, RowMarkup, SheetLayout, TableLayout};
pub use position::{
    TableDimensions, TablePosition, TableRange, to_column_num, to_column_string, to_row_num,
    to_row_string,
};
