//! Random-access grid over span/repeat-compressed table markup.
//!
//! [`TableIndex::build`] walks a [`TableLayout`] once with the same span logic
//! as [`TableCursor`] and records where every column, row and cell landed.
//! Repeated placeholders are recorded once together with their extent, so an
//! empty sheet of a million rows costs one entry, not a million.
//!
//! Lookups find the closest entry at or before the requested index and check
//! its extent. Coordinates covered by a merged cell resolve to the merged
//! cell's anchor. Overlapping spans from inconsistent markup are accepted:
//! whichever registration came last wins at the shared coordinates.

use super::cursor::TableCursor;
use super::layout::{CellMarkup, SheetLayout, TableLayout};
use super::position::{TableDimensions, TablePosition, TableRange};
use crate::document::ElementHandle;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub element: ElementHandle,
    pub index: u32,
}

/// A row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub element: ElementHandle,
    pub index: u32,
}

/// The cell found at a grid coordinate.
///
/// For a coordinate covered by a merged cell, `element` and the spans are
/// those of the anchor cell and `anchor` is the anchor's coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub element: ElementHandle,
    /// The coordinate that was looked up
    pub position: TablePosition,
    /// Top-left coordinate of the cell occupying `position`
    pub anchor: TablePosition,
    pub colspan: u32,
    pub rowspan: u32,
    pub has_content: bool,
}

impl CellRef {
    /// `true` when this coordinate is covered by a span from another
    /// coordinate.
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.position != self.anchor
    }
}

#[derive(Debug, Clone)]
struct ColumnEntry {
    element: ElementHandle,
    end: u32,
}

#[derive(Debug, Clone)]
struct CellEntry {
    element: ElementHandle,
    colspan: u32,
    rowspan: u32,
    /// Exclusive end column, covering all repetitions
    end: u32,
    has_content: bool,
    order: u64,
}

#[derive(Debug, Clone)]
struct RowEntry {
    element: ElementHandle,
    end: u32,
    cells: BTreeMap<u32, CellEntry>,
}

/// Area claimed by a cell spanning more than one coordinate.
#[derive(Debug, Clone)]
struct Merge {
    /// All repetitions of the cell, anchored at the first
    area: TableRange,
    element: ElementHandle,
    colspan: u32,
    rowspan: u32,
    has_content: bool,
    order: u64,
}

impl Merge {
    fn anchor_of(&self, position: TablePosition) -> TablePosition {
        let from = self.area.from();
        let offset = (position.column() - from.column()) / self.colspan * self.colspan;
        TablePosition::new(from.row(), from.column() + offset)
    }
}

/// Tracks the smallest rectangle holding content.
#[derive(Debug, Default)]
struct Bounds {
    from: Option<TablePosition>,
    to: Option<TablePosition>,
}

impl Bounds {
    fn include(&mut self, area: TableRange) {
        if area.is_empty() {
            return;
        }
        let (from, to) = (area.from(), area.to());
        self.from = Some(match self.from {
            Some(f) => TablePosition::new(f.row().min(from.row()), f.column().min(from.column())),
            None => from,
        });
        self.to = Some(match self.to {
            Some(t) => TablePosition::new(t.row().max(to.row()), t.column().max(to.column())),
            None => to,
        });
    }

    fn finish(self, origin: TablePosition) -> TableRange {
        match (self.from, self.to) {
            (Some(from), Some(to)) => TableRange::new(from, to),
            _ => TableRange::new(origin, origin),
        }
    }
}

/// Random-access view of a table or sheet.
///
/// Built once and immutable afterwards; cursors share it through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TableIndex {
    dimensions: TableDimensions,
    content_bounds: TableRange,
    columns: BTreeMap<u32, ColumnEntry>,
    rows: BTreeMap<u32, RowEntry>,
    /// Sorted by anchor row, registration order within a row
    merges: Vec<Merge>,
    tallest_merge: u32,
    first_shape: Option<ElementHandle>,
}

impl TableIndex {
    /// Register every column, row and cell of a table.
    ///
    /// Never fails: inconsistent spans are logged and resolved last-write-wins.
    pub fn build(layout: &TableLayout) -> Self {
        Registrar::default().register(layout)
    }

    /// Register the grid of a sheet and remember its first drawing shape.
    pub fn build_sheet(layout: &SheetLayout) -> Self {
        let mut index = Self::build(&layout.grid);
        index.first_shape = layout.first_shape;
        index
    }

    /// Number of rows and columns reached during registration.
    #[inline]
    pub fn dimensions(&self) -> TableDimensions {
        self.dimensions
    }

    /// Smallest range holding every cell with content, merged areas included.
    ///
    /// An empty table yields the empty range at `A1`.
    #[inline]
    pub fn content_bounds(&self) -> TableRange {
        self.content_bounds
    }

    /// Content bounds restricted to `within`.
    ///
    /// Only content inside `within` is considered and the result never leaves
    /// it. Without content the empty range at `within.from()` is returned.
    pub fn content_bounds_within(&self, within: TableRange) -> TableRange {
        let mut bounds = Bounds::default();
        let (from, to) = (within.from(), within.to());

        for (&row, entry) in self.rows.range(from.row()..to.row()) {
            for (&column, cell) in entry.cells.range(..to.column()) {
                if !cell.has_content {
                    continue;
                }
                let area = TableRange::new(
                    TablePosition::new(row, column),
                    TablePosition::new(row.saturating_add(1), cell.end),
                );
                bounds.include(area.intersection(&within));
            }
        }

        let candidates = self.merges.partition_point(|m| m.area.from().row() < to.row());
        for merge in self.merges[..candidates].iter().filter(|m| m.has_content) {
            bounds.include(merge.area.intersection(&within));
        }

        bounds.finish(from)
    }

    /// The column at `index`, or `None` beyond the grid.
    pub fn column(&self, index: u32) -> Option<ColumnRef> {
        if index >= self.dimensions.columns {
            return None;
        }
        let (_, entry) = self.columns.range(..=index).next_back()?;
        (index < entry.end).then_some(ColumnRef {
            element: entry.element,
            index,
        })
    }

    /// The row at `index`, or `None` beyond the grid.
    pub fn row(&self, index: u32) -> Option<RowRef> {
        if index >= self.dimensions.rows {
            return None;
        }
        let (_, entry) = self.row_entry(index)?;
        Some(RowRef {
            element: entry.element,
            index,
        })
    }

    /// The cell at `(row, column)`, or `None` beyond the grid or where the
    /// markup left a hole.
    ///
    /// Coordinates under a merged cell return the anchor cell.
    pub fn cell(&self, row: u32, column: u32) -> Option<CellRef> {
        if row >= self.dimensions.rows || column >= self.dimensions.columns {
            return None;
        }
        let position = TablePosition::new(row, column);
        let direct = self.direct_cell(position);
        let merged = self.merge_at(position);

        match (direct, merged) {
            (Some((order, _)), Some(merge)) if merge.order > order => {
                Some(merged_cell(merge, position))
            },
            (Some((_, cell)), _) => Some(cell),
            (None, Some(merge)) => Some(merged_cell(merge, position)),
            (None, None) => None,
        }
    }

    /// Same as [`cell`](Self::cell), addressed by position.
    #[inline]
    pub fn cell_at(&self, position: TablePosition) -> Option<CellRef> {
        self.cell(position.row(), position.column())
    }

    /// Areas covered by merged cells, in registration order.
    pub fn merged_ranges(&self) -> impl Iterator<Item = TableRange> + '_ {
        self.merges.iter().flat_map(|merge| {
            let from = merge.area.from();
            let count = merge.area.columns() / merge.colspan;
            (0..count).map(move |i| {
                let column = from.column() + i * merge.colspan;
                TableRange::new(
                    TablePosition::new(from.row(), column),
                    TablePosition::new(merge.area.to().row(), column + merge.colspan),
                )
            })
        })
    }

    /// First drawing shape of a sheet; always `None` for plain tables.
    #[inline]
    pub fn first_shape(&self) -> Option<ElementHandle> {
        self.first_shape
    }

    fn row_entry(&self, row: u32) -> Option<(u32, &RowEntry)> {
        let (&start, entry) = self.rows.range(..=row).next_back()?;
        (row < entry.end).then_some((start, entry))
    }

    fn direct_cell(&self, position: TablePosition) -> Option<(u64, CellRef)> {
        let (_, row) = self.row_entry(position.row())?;
        let (&start, cell) = row.cells.range(..=position.column()).next_back()?;
        if position.column() >= cell.end {
            return None;
        }
        let offset = (position.column() - start) / cell.colspan * cell.colspan;
        Some((
            cell.order,
            CellRef {
                element: cell.element,
                position,
                anchor: TablePosition::new(position.row(), start + offset),
                colspan: cell.colspan,
                rowspan: cell.rowspan,
                has_content: cell.has_content,
            },
        ))
    }

    /// Latest merge covering `position`.
    fn merge_at(&self, position: TablePosition) -> Option<&Merge> {
        let candidates = self
            .merges
            .partition_point(|m| m.area.from().row() <= position.row());
        self.merges[..candidates]
            .iter()
            .rev()
            .take_while(|m| m.area.from().row().saturating_add(self.tallest_merge) > position.row())
            .find(|m| m.area.contains(position))
    }
}

fn merged_cell(merge: &Merge, position: TablePosition) -> CellRef {
    CellRef {
        element: merge.element,
        position,
        anchor: merge.anchor_of(position),
        colspan: merge.colspan,
        rowspan: merge.rowspan,
        has_content: merge.has_content,
    }
}

/// One-pass builder state.
#[derive(Default)]
struct Registrar {
    index: TableIndex,
    cursor: TableCursor,
    bounds: Bounds,
    max_column: u32,
    order: u64,
    overlaps: usize,
}

impl Registrar {
    fn register(mut self, layout: &TableLayout) -> TableIndex {
        for column in &layout.columns {
            let start = self.cursor.column();
            let repeat = column.repeat.max(1);
            self.index.columns.insert(
                start,
                ColumnEntry {
                    element: column.element,
                    end: start.saturating_add(repeat),
                },
            );
            self.cursor.add_column(repeat);
        }
        self.max_column = self.cursor.column();
        self.cursor = TableCursor::new();

        for row in &layout.rows {
            let repeat = row.repeat.max(1);
            let has_content = row.cells.iter().any(|cell| cell.has_content);

            if has_content {
                for _ in 0..repeat {
                    self.register_row(row.element, 1, &row.cells);
                    self.cursor.add_row(1);
                }
            } else {
                self.register_row(row.element, repeat, &row.cells);
                self.cursor.add_row(repeat);
            }
        }

        if self.overlaps > 0 {
            warn!(
                overlaps = self.overlaps,
                "table markup has overlapping cells, later cells win"
            );
        }

        let mut index = self.index;
        index.dimensions = TableDimensions::new(self.cursor.row(), self.max_column);
        index.content_bounds = self.bounds.finish(TablePosition::default());

        debug!(
            rows = index.dimensions.rows,
            columns = index.dimensions.columns,
            merges = index.merges.len(),
            "table index built"
        );
        index
    }

    fn register_row(&mut self, element: ElementHandle, repeat: u32, cells: &[CellMarkup]) {
        let row = self.cursor.row();
        let mut entry = RowEntry {
            element,
            end: row.saturating_add(repeat),
            cells: BTreeMap::new(),
        };

        for cell in cells {
            let colspan = cell.colspan.max(1);
            let rowspan = cell.rowspan.max(1);
            let repeat = cell.repeat.max(1);

            if cell.has_content {
                for _ in 0..repeat {
                    self.register_cell(&mut entry, cell, colspan, rowspan, 1);
                    self.cursor.add_cell(colspan, rowspan, 1);
                }
            } else {
                self.register_cell(&mut entry, cell, colspan, rowspan, repeat);
                self.cursor.add_cell(colspan, rowspan, repeat);
            }
        }

        self.index.rows.insert(row, entry);
    }

    fn register_cell(
        &mut self,
        row: &mut RowEntry,
        cell: &CellMarkup,
        colspan: u32,
        rowspan: u32,
        repeat: u32,
    ) {
        let position = self.cursor.position();
        let end = position.column().saturating_add(colspan.saturating_mul(repeat));
        self.order += 1;

        if !self.index.merges.is_empty() && self.index.merge_at(position).is_some() {
            self.overlaps += 1;
        }

        let previous = row.cells.insert(
            position.column(),
            CellEntry {
                element: cell.element,
                colspan,
                rowspan,
                end,
                has_content: cell.has_content,
                order: self.order,
            },
        );
        if previous.is_some() {
            self.overlaps += 1;
        }

        let area = TableRange::new(
            position,
            TablePosition::new(position.row().saturating_add(rowspan), end),
        );
        if colspan > 1 || rowspan > 1 {
            self.index.merges.push(Merge {
                area,
                element: cell.element,
                colspan,
                rowspan,
                has_content: cell.has_content,
                order: self.order,
            });
            self.index.tallest_merge = self.index.tallest_merge.max(rowspan);
        }

        if cell.has_content {
            self.bounds.include(area);
        }
        self.max_column = self.max_column.max(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::layout::{ColumnMarkup, RowMarkup};
    use pretty_assertions::assert_eq;

    fn handle(i: usize) -> ElementHandle {
        ElementHandle::new(i)
    }

    fn row(element: usize, cells: Vec<CellMarkup>) -> RowMarkup {
        RowMarkup {
            element: handle(element),
            repeat: 1,
            cells,
        }
    }

    fn filled(element: usize) -> CellMarkup {
        CellMarkup::new(handle(element), true)
    }

    fn empty(element: usize) -> CellMarkup {
        CellMarkup::new(handle(element), false)
    }

    /// ```text
    ///     A    B    C    D
    /// 1  [10 ] [11     ] [12]
    /// 2  [20 ] [11 cov ] [21]
    /// 3  [30      ]  [31][32]
    /// ```
    fn merged_layout() -> TableLayout {
        TableLayout {
            columns: vec![
                ColumnMarkup {
                    element: handle(1),
                    repeat: 1,
                },
                ColumnMarkup {
                    element: handle(2),
                    repeat: 3,
                },
            ],
            rows: vec![
                row(100, vec![filled(10), filled(11).with_span(2, 2), filled(12)]),
                row(101, vec![filled(20), filled(21)]),
                row(102, vec![filled(30).with_span(2, 1), filled(31), filled(32)]),
            ],
        }
    }

    #[test]
    fn test_dimensions_and_lookup() {
        let index = TableIndex::build(&merged_layout());
        assert_eq!(index.dimensions(), TableDimensions::new(3, 4));

        assert_eq!(index.column(0).unwrap().element, handle(1));
        assert_eq!(index.column(3).unwrap().element, handle(2));
        assert_eq!(index.row(2).unwrap().element, handle(102));

        assert_eq!(index.cell(0, 0).unwrap().element, handle(10));
        assert_eq!(index.cell(0, 3).unwrap().element, handle(12));
        assert_eq!(index.cell(1, 0).unwrap().element, handle(20));
        assert_eq!(index.cell(1, 3).unwrap().element, handle(21));
        assert_eq!(index.cell(2, 2).unwrap().element, handle(31));
        assert_eq!(index.cell(2, 3).unwrap().element, handle(32));
    }

    #[test]
    fn test_covered_coordinates_resolve_to_anchor() {
        let index = TableIndex::build(&merged_layout());
        let anchor = index.cell(0, 1).unwrap();
        assert!(!anchor.is_covered());
        assert_eq!((anchor.colspan, anchor.rowspan), (2, 2));

        for (r, c) in [(0, 2), (1, 1), (1, 2)] {
            let cell = index.cell(r, c).unwrap();
            assert_eq!(cell.element, handle(11));
            assert_eq!(cell.anchor, TablePosition::new(0, 1));
            assert!(cell.is_covered());
        }

        let covered = index.cell(2, 1).unwrap();
        assert_eq!(covered.element, handle(30));
        assert_eq!(covered.anchor, TablePosition::new(2, 0));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let index = TableIndex::build(&merged_layout());
        assert!(index.cell(3, 0).is_none());
        assert!(index.cell(0, 4).is_none());
        assert!(index.cell(u32::MAX, u32::MAX).is_none());
        assert!(index.row(3).is_none());
        assert!(index.column(4).is_none());

        let empty = TableIndex::build(&TableLayout::default());
        assert_eq!(empty.dimensions(), TableDimensions::new(0, 0));
        assert!(empty.cell(0, 0).is_none());
        assert_eq!(empty.content_bounds(), TableRange::default());
    }

    #[test]
    fn test_repeated_placeholders_are_compressed() {
        let layout = TableLayout {
            columns: vec![ColumnMarkup {
                element: handle(1),
                repeat: 16384,
            }],
            rows: vec![
                row(100, vec![filled(10), empty(11).with_repeat(16383)]),
                RowMarkup {
                    element: handle(101),
                    repeat: 1_048_575,
                    cells: vec![empty(20).with_repeat(16384)],
                },
            ],
        };
        let index = TableIndex::build(&layout);

        assert_eq!(index.dimensions(), TableDimensions::new(1_048_576, 16384));
        assert_eq!(index.rows.len(), 2);
        assert_eq!(index.cell(0, 9000).unwrap().element, handle(11));
        assert_eq!(index.cell(0, 9000).unwrap().anchor, TablePosition::new(0, 9000));
        assert_eq!(index.cell(500_000, 77).unwrap().element, handle(20));
        assert_eq!(index.row(1_048_575).unwrap().element, handle(101));
        assert_eq!(
            index.content_bounds(),
            TableRange::new(TablePosition::new(0, 0), TablePosition::new(1, 1))
        );
    }

    #[test]
    fn test_repeated_rows_with_content_are_individual() {
        let layout = TableLayout {
            columns: vec![],
            rows: vec![RowMarkup {
                element: handle(100),
                repeat: 3,
                cells: vec![filled(10).with_repeat(2)],
            }],
        };
        let index = TableIndex::build(&layout);
        assert_eq!(index.dimensions(), TableDimensions::new(3, 2));
        assert_eq!(index.rows.len(), 3);
        assert_eq!(index.cell(2, 1).unwrap().element, handle(10));
        assert_eq!(
            index.content_bounds(),
            TableRange::new(TablePosition::new(0, 0), TablePosition::new(3, 2))
        );
    }

    #[test]
    fn test_content_bounds() {
        let layout = TableLayout {
            columns: vec![],
            rows: vec![
                row(100, vec![empty(1).with_repeat(5)]),
                row(101, vec![empty(2), filled(3), empty(4), filled(5).with_span(2, 1)]),
                row(102, vec![empty(6).with_repeat(5)]),
            ],
        };
        let index = TableIndex::build(&layout);
        assert_eq!(index.content_bounds().to_string(), "B2:F3");

        let window = TableRange::parse("A1:D10").unwrap();
        assert_eq!(index.content_bounds_within(window).to_string(), "B2:C3");

        let nothing = TableRange::parse("A3:E4").unwrap();
        let bounds = index.content_bounds_within(nothing);
        assert!(bounds.is_empty());
        assert_eq!(bounds.from(), nothing.from());
    }

    #[test]
    fn test_content_bounds_within_sees_tall_merges_from_above() {
        let layout = TableLayout {
            columns: vec![],
            rows: vec![
                row(100, vec![filled(1).with_span(1, 4), empty(2)]),
                row(101, vec![empty(3)]),
                row(102, vec![empty(4)]),
                row(103, vec![empty(5)]),
            ],
        };
        let index = TableIndex::build(&layout);
        let window = TableRange::parse("A3:B5").unwrap();
        assert_eq!(index.content_bounds_within(window).to_string(), "A3:A5");
    }

    #[test]
    fn test_overlapping_spans_last_write_wins() {
        // B1:C2 is merged, then row 2 places a 2-wide cell at A2 over B2
        let layout = TableLayout {
            columns: vec![],
            rows: vec![
                row(100, vec![filled(1), filled(2).with_span(2, 2)]),
                row(101, vec![filled(3).with_span(2, 1)]),
            ],
        };
        let index = TableIndex::build(&layout);
        assert_eq!(index.cell(1, 1).unwrap().element, handle(3));
        assert_eq!(index.cell(1, 2).unwrap().element, handle(2));
        assert_eq!(index.cell(0, 2).unwrap().element, handle(2));
    }

    #[test]
    fn test_merged_ranges() {
        let index = TableIndex::build(&merged_layout());
        let ranges: Vec<String> = index.merged_ranges().map(|r| r.to_string()).collect();
        assert_eq!(ranges, vec!["B1:D3".to_string(), "A3:C4".to_string()]);
    }

    #[test]
    fn test_sheet_keeps_first_shape() {
        let sheet = SheetLayout {
            grid: merged_layout(),
            first_shape: Some(handle(500)),
        };
        let index = TableIndex::build_sheet(&sheet);
        assert_eq!(index.first_shape(), Some(handle(500)));
        assert_eq!(TableIndex::build(&sheet.grid).first_shape(), None);
    }
}
