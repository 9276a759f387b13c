//! End-to-end navigation over in-memory documents.

use docnav::common::{Color, Measure, PrintOrientation};
use docnav::document::{Document, DocumentPath, ElementHandle, ElementTree, ElementType};
use docnav::style::{PageLayout, ResolvedStyle, TableCellStyle, TextStyle};
use docnav::table::{TablePosition, TableRange};
use docnav::{Error, SheetWindow, TableDimensions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn cell_style(background: Color) -> ResolvedStyle {
    ResolvedStyle {
        table_cell: Some(TableCellStyle {
            background_color: Some(background),
            ..Default::default()
        }),
        ..Default::default()
    }
}

struct Spreadsheet {
    tree: ElementTree,
    sheet: ElementHandle,
    wide: ElementHandle,
    tall: ElementHandle,
    shape: ElementHandle,
}

/// ```text
///      A      B      C
/// 1  wide---wide    c1
/// 2  tall   b2     (empty)
/// 3  tall   b3     (empty)
/// ```
fn spreadsheet() -> Spreadsheet {
    let mut tree = ElementTree::new();
    let root = tree.create_root(ElementType::Root);
    let sheet = tree.append_child(root, ElementType::Sheet).unwrap();
    let column = tree.append_child(sheet, ElementType::TableColumn).unwrap();
    tree.set_repeat(column, 3).unwrap();

    let cell = |tree: &mut ElementTree, row, text: &str| {
        let cell = tree.append_child(row, ElementType::TableCell).unwrap();
        if !text.is_empty() {
            tree.set_text(cell, text).unwrap();
        }
        cell
    };

    let row1 = tree.append_child(sheet, ElementType::TableRow).unwrap();
    let wide = cell(&mut tree, row1, "wide");
    tree.set_span(wide, 2, 1).unwrap();
    tree.set_style(wide, cell_style(Color::new(255, 0, 0))).unwrap();
    let covered = cell(&mut tree, row1, "");
    tree.set_covered(covered, true).unwrap();
    cell(&mut tree, row1, "c1");

    let row2 = tree.append_child(sheet, ElementType::TableRow).unwrap();
    let tall = cell(&mut tree, row2, "tall");
    tree.set_span(tall, 1, 2).unwrap();
    cell(&mut tree, row2, "b2");
    cell(&mut tree, row2, "");

    let row3 = tree.append_child(sheet, ElementType::TableRow).unwrap();
    let covered = cell(&mut tree, row3, "");
    tree.set_covered(covered, true).unwrap();
    cell(&mut tree, row3, "b3");
    cell(&mut tree, row3, "");

    let shape = tree.append_sheet_shape(sheet, ElementType::Frame).unwrap();
    tree.append_sheet_shape(sheet, ElementType::Image).unwrap();

    Spreadsheet {
        tree,
        sheet,
        wide,
        tall,
        shape,
    }
}

#[test]
fn covered_cells_resolve_to_their_anchor() {
    let sample = spreadsheet();
    let doc = Document::new(sample.tree);
    let index = doc.table_index(sample.sheet).unwrap();

    assert_eq!(index.dimensions(), TableDimensions::new(3, 3));
    let b1 = index.cell_at("B1".parse().unwrap()).unwrap();
    assert_eq!(b1.element, sample.wide);
    assert!(b1.is_covered());
    assert_eq!(b1.anchor, TablePosition::new(0, 0));

    let a3 = index.cell_at("A3".parse().unwrap()).unwrap();
    assert_eq!(a3.element, sample.tall);
    assert_eq!(a3.anchor.to_string(), "A2");

    assert_eq!(index.content_bounds().to_string(), "A1:D4");
    assert_eq!(
        index.merged_ranges().map(|r| r.to_string()).collect::<Vec<_>>(),
        vec!["A1:C2", "A2:B4"]
    );
}

#[test]
fn cursor_walks_sheet_grid() {
    let sample = spreadsheet();
    let doc = Document::new(sample.tree);
    let mut cursor = doc.cursor().unwrap();

    assert!(cursor.move_to_first_child());
    assert_eq!(cursor.move_to_first_table_row(), Ok(true));
    assert!(cursor.move_to_first_child());
    assert_eq!(cursor.element(), sample.wide);
    let red = Some(Color::new(255, 0, 0));
    assert_eq!(
        cursor.current_style().table_cell.as_ref().unwrap().background_color,
        red
    );

    // B1 is covered by the wide cell; the cursor still visits the coordinate
    assert!(cursor.move_to_next_sibling());
    assert_eq!(cursor.element(), sample.wide);
    assert!(cursor.table_cell().unwrap().is_covered());
    assert_eq!(cursor.document_path().to_string(), "/child:0/row:0/child:1");

    cursor.move_to_str("/child:0/row:2/child:0").unwrap();
    assert_eq!(cursor.element(), sample.tall);
    assert_eq!(cursor.table_position(), Some(TablePosition::new(2, 0)));
    // Only A1 declares a background
    assert!(cursor.current_style().table_cell.is_none());
}

#[test]
fn sheet_shapes_are_reachable() {
    let sample = spreadsheet();
    let doc = Document::new(sample.tree);
    let mut cursor = doc.cursor().unwrap();

    assert!(cursor.move_to_first_child());
    assert_eq!(cursor.move_to_first_sheet_shape(), Ok(true));
    assert_eq!(cursor.element(), sample.shape);
    assert!(cursor.move_to_next_sibling());
    assert_eq!(cursor.element_type(), ElementType::Image);
    assert_eq!(cursor.document_path().to_string(), "/child:0/shape:1");
    assert!(!cursor.move_to_next_sibling());

    let path = cursor.document_path();
    let mut replay = doc.cursor().unwrap();
    replay.move_to(&path).unwrap();
    assert!(replay.same_position(&cursor));

    assert_eq!(
        cursor.move_to_first_sheet_shape(),
        Err(Error::NotASheet(ElementType::Image))
    );
}

#[test]
fn master_page_is_entered_from_pages_only() {
    let mut tree = ElementTree::new();
    let root = tree.create_root(ElementType::Root);
    let page = tree.append_child(root, ElementType::Page).unwrap();
    tree.append_child(root, ElementType::Page).unwrap();
    let master = tree.add_master_page();
    let header = tree.append_child(master, ElementType::Paragraph).unwrap();
    let layout = PageLayout {
        width: Some("21cm".parse::<Measure>().unwrap()),
        height: Some("29.7cm".parse::<Measure>().unwrap()),
        print_orientation: Some(PrintOrientation::Portrait),
        ..Default::default()
    };
    tree.set_page_layout(master, layout.clone()).unwrap();
    tree.set_master_page(page, master).unwrap();

    let doc = Document::new(tree);
    let mut cursor = doc.cursor().unwrap();
    assert_eq!(
        cursor.move_to_master_page(),
        Err(Error::UnsupportedNavigation {
            element: ElementType::Root,
            navigation: "master_page",
        })
    );

    assert!(cursor.move_to_first_child());
    assert_eq!(cursor.move_to_master_page(), Ok(true));
    assert_eq!(cursor.element(), master);
    assert_eq!(cursor.page_layout(), Some(layout));
    assert!(cursor.move_to_first_child());
    assert_eq!(cursor.element(), header);
    assert_eq!(cursor.document_path().to_string(), "/child:0/master:0/child:0");

    cursor.move_to_str("/child:1").unwrap();
    assert_eq!(cursor.move_to_master_page(), Ok(false));
    assert_eq!(cursor.depth(), 1);
}

#[test]
fn failed_path_replay_leaves_cursor_in_place() {
    let sample = spreadsheet();
    let doc = Document::new(sample.tree);
    let mut cursor = doc.cursor().unwrap();
    cursor.move_to_str("/child:0/row:1/child:1").unwrap();
    let before = cursor.copy();

    for bad in ["/child:0/row:3", "/child:0/column:9", "/child:0/row:0/child:5", "/child:1"] {
        let path: DocumentPath = bad.parse().unwrap();
        assert!(matches!(cursor.move_to(&path), Err(Error::PathNotFound { .. })));
        assert!(cursor.same_position(&before), "moved by {}", bad);
        assert_eq!(cursor.current_style(), before.current_style());
    }

    assert!(matches!(
        cursor.move_to_str("child:0"),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn sheet_window_caps_repeated_rows() {
    let mut tree = ElementTree::new();
    let root = tree.create_root(ElementType::Root);
    let sheet = tree.append_child(root, ElementType::Sheet).unwrap();
    let column = tree.append_child(sheet, ElementType::TableColumn).unwrap();
    tree.set_repeat(column, 16_384).unwrap();
    let row = tree.append_child(sheet, ElementType::TableRow).unwrap();
    let cell = tree.append_child(row, ElementType::TableCell).unwrap();
    tree.set_text(cell, "x").unwrap();
    let filler = tree.append_child(sheet, ElementType::TableRow).unwrap();
    tree.set_repeat(filler, 1_048_575).unwrap();

    let doc = Document::new(tree);
    let index = doc.table_index(sheet).unwrap();
    assert_eq!(index.dimensions(), TableDimensions::new(1_048_576, 16_384));
    assert_eq!(index.content_bounds(), TableRange::parse("A1:B2").unwrap());
    assert_eq!(
        SheetWindow::default().extent(&index),
        TableDimensions::new(1, 1)
    );
    assert_eq!(
        SheetWindow::new().with_limit_by_content(false).extent(&index),
        TableDimensions::new(10_000, 500)
    );

    let mut cursor = doc.cursor().unwrap();
    cursor.move_to_str("/child:0/row:1048575").unwrap();
    assert_eq!(cursor.element(), filler);
    assert!(!cursor.move_to_next_sibling());
}

/// A random tree: each node gets a few children, with a text style whose size
/// depends on the node.
fn random_tree(shape: &[u8]) -> ElementTree {
    let mut tree = ElementTree::new();
    let root = tree.create_root(ElementType::Root);
    let mut open = vec![root];
    for (i, &children) in shape.iter().enumerate() {
        let Some(parent) = open.get(i).copied() else {
            break;
        };
        for c in 0..children % 4 {
            let child = tree.append_child(parent, ElementType::Span).unwrap();
            if (i + c as usize) % 2 == 0 {
                let style = ResolvedStyle {
                    text: Some(TextStyle {
                        font_size: Some(Measure::pt((i + c as usize) as f64)),
                        ..Default::default()
                    }),
                    ..Default::default()
                };
                tree.set_style(child, style).unwrap();
            }
            open.push(child);
        }
    }
    tree
}

proptest! {
    #[test]
    fn first_child_then_parent_is_identity(
        shape in proptest::collection::vec(0u8..8, 1..24),
        moves in proptest::collection::vec(0u8..4, 0..40),
    ) {
        let doc = Document::new(random_tree(&shape));
        let mut cursor = doc.cursor().unwrap();

        for m in moves {
            let before = cursor.copy();
            match m {
                0 => {
                    if cursor.move_to_first_child() {
                        prop_assert!(cursor.move_to_parent());
                        prop_assert!(cursor.same_position(&before));
                        prop_assert_eq!(cursor.current_style(), before.current_style());
                        cursor.move_to_first_child();
                    } else {
                        prop_assert!(cursor.same_position(&before));
                    }
                },
                1 => { cursor.move_to_next_sibling(); },
                2 => { cursor.move_to_previous_sibling(); },
                _ => { cursor.move_to_parent(); },
            }

            let mut replay = doc.cursor().unwrap();
            prop_assert!(replay.move_to(&cursor.document_path()).is_ok());
            prop_assert!(replay.same_position(&cursor));
            prop_assert_eq!(replay.current_style(), cursor.current_style());
        }
    }
}
