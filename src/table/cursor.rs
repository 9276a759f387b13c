//! Streaming row/column tracker for table markup.
//!
//! ODF and OOXML never state the coordinate of a cell. Cells are emitted row
//! by row, possibly repeated, and a cell spanning several rows silently
//! reserves columns in the rows below it. [`TableCursor`] replays that stream
//! and always knows the coordinate the next cell will land on.

use super::position::TablePosition;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::ops::Range;

/// Reserved column ranges of one row, sorted and disjoint.
type RowSpans = SmallVec<[Range<u32>; 4]>;

/// Tracks the grid coordinate while table markup is read sequentially.
///
/// Every call is O(1) amortized, plus the number of spans crossing the
/// current row boundary. Nothing proportional to the grid size is kept.
///
/// # Examples
///
/// ```
/// use docnav::table::TableCursor;
///
/// let mut cursor = TableCursor::new();
/// cursor.add_cell(2, 2, 1); // A1:B2 merged
/// cursor.add_cell(1, 1, 1);
/// cursor.add_row(1);
///
/// // A2 and B2 are still taken by the merged cell
/// assert_eq!((cursor.row(), cursor.column()), (1, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableCursor {
    row: u32,
    column: u32,
    /// Ranges reserved on the current row, consumed left to right
    current: RowSpans,
    /// Ranges reserved on the following rows, nearest row first
    pending: VecDeque<RowSpans>,
}

impl TableCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `repeat` columns. Used while reading column declarations.
    pub fn add_column(&mut self, repeat: u32) {
        self.column = self.column.saturating_add(repeat.max(1));
    }

    /// Move to the start of the next row, `repeat` rows down.
    ///
    /// A repeat greater than one drops every pending row span. Repeated rows
    /// are assumed not to be crossed by spans from above; cells below such a
    /// block start again at column 0.
    pub fn add_row(&mut self, repeat: u32) {
        let repeat = repeat.max(1);
        self.row = self.row.saturating_add(repeat);
        self.column = 0;

        if repeat > 1 {
            self.current.clear();
            self.pending.clear();
        } else {
            self.current = self.pending.pop_front().unwrap_or_default();
            self.skip_reserved();
        }
    }

    /// Place a cell of `colspan` x `rowspan`, written `repeat` times in a row.
    pub fn add_cell(&mut self, colspan: u32, rowspan: u32, repeat: u32) {
        let colspan = colspan.max(1);
        let rowspan = rowspan.max(1);
        let repeat = repeat.max(1);

        let next = self.column.saturating_add(colspan.saturating_mul(repeat));

        for offset in 0..(rowspan - 1) as usize {
            if self.pending.len() <= offset {
                self.pending.resize_with(offset + 1, RowSpans::new);
            }
            insert_span(&mut self.pending[offset], self.column..next);
        }

        self.column = next;
        self.skip_reserved();
    }

    /// Coordinate the next cell will be placed at.
    #[inline]
    pub fn position(&self) -> TablePosition {
        TablePosition::new(self.row, self.column)
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Move past every column on this row claimed by a taller cell above.
    ///
    /// Ranges already behind the column were overwritten by malformed input
    /// and are dropped. A range the column sits inside is skipped as a whole.
    fn skip_reserved(&mut self) {
        let mut consumed = 0;
        for span in &self.current {
            if span.start > self.column {
                break;
            }
            self.column = self.column.max(span.end);
            consumed += 1;
        }
        if consumed > 0 {
            self.current.drain(..consumed);
        }
    }
}

/// Insert keeping the list sorted by start. Overlap only comes from malformed
/// input; the ranges are kept as given and resolved by `skip_reserved`.
fn insert_span(spans: &mut RowSpans, span: Range<u32>) {
    let index = spans.partition_point(|s| s.start < span.start);
    spans.insert(index, span);
}
