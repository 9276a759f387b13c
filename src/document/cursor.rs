//! Stateful walker over a [`Document`].
//!
//! The cursor keeps one frame per level from the root down to its position.
//! Each frame stores the fully cascaded style of its element, so reading the
//! current style is a field access and entering a child costs a single merge
//! with the child's own style. Moving up pops a frame; moving sideways
//! replaces the top frame, recomputed against the unchanged parent frame.
//!
//! Rows, columns and cells entered through a table or sheet index are
//! addressed by grid coordinate rather than by markup element, so a row
//! repeated a thousand times in the markup is a thousand distinct positions.

use super::adapter::ElementAdapter;
use super::doc::Document;
use super::element::{ElementHandle, ElementType};
use super::path::{DocumentPath, PathStep};
use crate::common::{Error, Result};
use crate::style::{PageLayout, ResolvedStyle, override_style};
use crate::table::{CellRef, TableIndex, TablePosition};
use std::sync::Arc;
use tracing::trace;

/// Which grid slot a frame occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Column(u32),
    Row(u32),
    Cell(TablePosition),
}

#[derive(Debug, Clone)]
struct Grid {
    index: Arc<TableIndex>,
    slot: Slot,
}

impl Grid {
    /// The element occupying `slot`, if the grid has one there.
    fn resolve(&self, slot: Slot) -> Option<ElementHandle> {
        match slot {
            Slot::Column(column) => self.index.column(column).map(|c| c.element),
            Slot::Row(row) => self.index.row(row).map(|r| r.element),
            Slot::Cell(position) => self.index.cell_at(position).map(|c| c.element),
        }
    }
}

#[derive(Debug, Clone)]
struct Frame {
    element: ElementHandle,
    style: ResolvedStyle,
    /// How this frame was reached from its parent; `None` only for the root
    step: Option<PathStep>,
    grid: Option<Grid>,
}

/// A position in a document together with its cascaded style.
///
/// Structural moves return `bool`: a missing parent, child or sibling is an
/// ordinary outcome of a tree walk and leaves the cursor where it was.
/// Capability moves return `Result<bool>` and fail when the current element
/// does not offer the capability at all.
///
/// # Example
///
/// ```rust
/// use docnav::document::{Document, ElementTree, ElementType};
///
/// let mut tree = ElementTree::new();
/// let root = tree.create_root(ElementType::Root);
/// let paragraph = tree.append_child(root, ElementType::Paragraph).unwrap();
/// tree.append_child(paragraph, ElementType::Text).unwrap();
///
/// let doc = Document::new(tree);
/// let mut cursor = doc.cursor().unwrap();
/// assert!(cursor.move_to_first_child());
/// assert!(cursor.move_to_first_child());
/// assert_eq!(cursor.element_type(), ElementType::Text);
/// assert_eq!(cursor.document_path().to_string(), "/child:0/child:0");
/// assert!(!cursor.move_to_next_sibling());
/// ```
pub struct DocumentCursor<'a, A> {
    document: &'a Document<A>,
    frames: Vec<Frame>,
}

// Manual impl: the adapter type itself need not be `Clone`.
impl<A> Clone for DocumentCursor<'_, A> {
    fn clone(&self) -> Self {
        Self {
            document: self.document,
            frames: self.frames.clone(),
        }
    }
}

impl<A> std::fmt::Debug for DocumentCursor<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCursor")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<'a, A: ElementAdapter> DocumentCursor<'a, A> {
    /// A cursor at the root of `document`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] when the backend has no root.
    pub fn new(document: &'a Document<A>) -> Result<Self> {
        let root = document.root()?;
        let style = override_style(&ResolvedStyle::default(), &document.adapter().partial_style(root));
        Ok(Self {
            document,
            frames: vec![Frame {
                element: root,
                style,
                step: None,
                grid: None,
            }],
        })
    }

    /// An independent cursor at the same position.
    ///
    /// Table indexes are shared, never copied.
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[inline]
    pub fn document(&self) -> &'a Document<A> {
        self.document
    }

    #[inline]
    pub fn element(&self) -> ElementHandle {
        self.top().element
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        self.adapter().element_type(self.element())
    }

    /// Number of moves below the root; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Cascaded style of the current element.
    #[inline]
    pub fn current_style(&self) -> &ResolvedStyle {
        &self.top().style
    }

    /// Cascaded style of the ancestor `levels_up` above the current element.
    ///
    /// `ancestor_style(0)` is [`current_style`](Self::current_style).
    pub fn ancestor_style(&self, levels_up: usize) -> Option<&ResolvedStyle> {
        let depth = self.depth().checked_sub(levels_up)?;
        Some(&self.frames[depth].style)
    }

    /// Path from the root to the current position.
    ///
    /// Replaying it with [`move_to`](Self::move_to) from any position of the
    /// same document returns here.
    pub fn document_path(&self) -> DocumentPath {
        self.frames.iter().filter_map(|f| f.step).collect()
    }

    /// `true` when both cursors walk the same document and stand at the same
    /// position.
    pub fn same_position(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document)
            && self.frames.len() == other.frames.len()
            && self
                .frames
                .iter()
                .zip(&other.frames)
                .all(|(a, b)| a.element == b.element && a.step == b.step)
    }

    /// Grid coordinate of the current row, column or cell.
    ///
    /// Rows report column 0 and columns report row 0.
    pub fn table_position(&self) -> Option<TablePosition> {
        match self.top().grid.as_ref()?.slot {
            Slot::Column(column) => Some(TablePosition::new(0, column)),
            Slot::Row(row) => Some(TablePosition::new(row, 0)),
            Slot::Cell(position) => Some(position),
        }
    }

    /// The cell at the current grid coordinate, with its anchor and spans.
    pub fn table_cell(&self) -> Option<CellRef> {
        let grid = self.top().grid.as_ref()?;
        match grid.slot {
            Slot::Cell(position) => grid.index.cell_at(position),
            _ => None,
        }
    }

    /// Index of the current table or sheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotATable`] when the current element has no grid.
    pub fn table_index(&self) -> Result<Arc<TableIndex>> {
        self.document.table_index(self.element())
    }

    /// Page geometry of the current element, if the backend reports one.
    pub fn page_layout(&self) -> Option<PageLayout> {
        self.adapter().page_layout(self.element())
    }

    pub fn move_to_parent(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop();
        true
    }

    /// Enter the first child. Inside a grid row this is the cell in column 0.
    pub fn move_to_first_child(&mut self) -> bool {
        let top = self.top();
        if let Some(Grid {
            index,
            slot: Slot::Row(row),
        }) = &top.grid
        {
            let slot = Slot::Cell(TablePosition::new(*row, 0));
            let grid = Grid {
                index: Arc::clone(index),
                slot,
            };
            return match grid.resolve(slot) {
                Some(element) => {
                    self.push(element, PathStep::Child(0), Some(grid));
                    true
                },
                None => false,
            };
        }

        match self.adapter().first_child(top.element) {
            Some(child) => {
                self.push(child, PathStep::Child(0), None);
                true
            },
            None => false,
        }
    }

    pub fn move_to_previous_sibling(&mut self) -> bool {
        self.move_sideways(false)
    }

    pub fn move_to_next_sibling(&mut self) -> bool {
        self.move_sideways(true)
    }

    /// Enter the master page of a slide or page.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedNavigation`] when the element kind has no master
    /// page concept.
    pub fn move_to_master_page(&mut self) -> Result<bool> {
        let kind = self.element_type();
        if !kind.has_master_page() {
            return Err(Error::UnsupportedNavigation {
                element: kind,
                navigation: "master_page",
            });
        }
        match self.adapter().master_page(self.element()) {
            Some(master) => {
                self.push(master, PathStep::MasterPage(0), None);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Enter column 0 of the current table or sheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotATable`] when the current element has no grid.
    pub fn move_to_first_table_column(&mut self) -> Result<bool> {
        self.enter_grid(Slot::Column(0))
    }

    /// Enter row 0 of the current table or sheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotATable`] when the current element has no grid.
    pub fn move_to_first_table_row(&mut self) -> Result<bool> {
        self.enter_grid(Slot::Row(0))
    }

    /// Enter the first drawing shape of the current sheet.
    ///
    /// # Errors
    ///
    /// [`Error::NotASheet`] when the current element is not a sheet, or is
    /// one whose backend does not describe it.
    pub fn move_to_first_sheet_shape(&mut self) -> Result<bool> {
        let kind = self.element_type();
        if kind != ElementType::Sheet {
            return Err(Error::NotASheet(kind));
        }
        let index = match self.table_index() {
            Ok(index) => index,
            Err(Error::NotATable(_)) => return Err(Error::NotASheet(kind)),
            Err(err) => return Err(err),
        };
        match index.first_shape() {
            Some(shape) => {
                self.push(shape, PathStep::Shape(0), None);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Jump to `path`, replayed from the root.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] naming the first step that could not be
    /// followed. The cursor is left where it was.
    pub fn move_to(&mut self, path: &DocumentPath) -> Result<()> {
        let saved = std::mem::take(&mut self.frames);
        self.frames.extend(saved.first().cloned());

        for (i, step) in path.iter().enumerate() {
            if !self.follow(step) {
                trace!(%path, step = i, "path replay failed");
                self.frames = saved;
                return Err(Error::PathNotFound {
                    path: path.to_string(),
                    step: i,
                });
            }
        }
        Ok(())
    }

    /// Parse `path` and jump to it.
    pub fn move_to_str(&mut self, path: &str) -> Result<()> {
        let path: DocumentPath = path.parse()?;
        self.move_to(&path)
    }

    #[inline]
    fn adapter(&self) -> &'a A {
        self.document.adapter()
    }

    #[inline]
    fn top(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn push(&mut self, element: ElementHandle, step: PathStep, grid: Option<Grid>) {
        let style = override_style(&self.top().style, &self.adapter().partial_style(element));
        self.frames.push(Frame {
            element,
            style,
            step: Some(step),
            grid,
        });
    }

    fn enter_grid(&mut self, slot: Slot) -> Result<bool> {
        let index = self.table_index()?;
        let grid = Grid { index, slot };
        let step = match slot {
            Slot::Column(column) => PathStep::Column(column),
            Slot::Row(row) => PathStep::Row(row),
            Slot::Cell(position) => PathStep::Child(position.column()),
        };
        match grid.resolve(slot) {
            Some(element) => {
                self.push(element, step, Some(grid));
                Ok(true)
            },
            None => Ok(false),
        }
    }

    fn move_sideways(&mut self, forward: bool) -> bool {
        let Some((top, ancestors)) = self.frames.split_last() else {
            return false;
        };
        let (Some(parent), Some(step)) = (ancestors.last(), top.step) else {
            return false;
        };

        let index = if forward {
            step.index().checked_add(1)
        } else {
            step.index().checked_sub(1)
        };
        let Some(index) = index else {
            return false;
        };

        let (element, grid) = match &top.grid {
            Some(grid) => {
                let slot = match grid.slot {
                    Slot::Column(_) => Slot::Column(index),
                    Slot::Row(_) => Slot::Row(index),
                    Slot::Cell(position) => Slot::Cell(TablePosition::new(position.row(), index)),
                };
                let Some(element) = grid.resolve(slot) else {
                    return false;
                };
                let grid = Grid {
                    index: Arc::clone(&grid.index),
                    slot,
                };
                (element, Some(grid))
            },
            None => {
                let sibling = if forward {
                    self.adapter().next_sibling(top.element)
                } else {
                    self.adapter().previous_sibling(top.element)
                };
                let Some(element) = sibling else {
                    return false;
                };
                (element, None)
            },
        };

        let style = override_style(&parent.style, &self.adapter().partial_style(element));
        let frame = Frame {
            element,
            style,
            step: Some(step.with_index(index)),
            grid,
        };
        let last = self.frames.len() - 1;
        self.frames[last] = frame;
        true
    }

    /// Follow one path step from the current position.
    fn follow(&mut self, step: PathStep) -> bool {
        match step {
            PathStep::Child(n) => {
                if let Some(Grid {
                    index,
                    slot: Slot::Row(row),
                }) = &self.top().grid
                {
                    let slot = Slot::Cell(TablePosition::new(*row, n));
                    let grid = Grid {
                        index: Arc::clone(index),
                        slot,
                    };
                    return match grid.resolve(slot) {
                        Some(element) => {
                            self.push(element, step, Some(grid));
                            true
                        },
                        None => false,
                    };
                }
                self.move_to_first_child() && self.advance(n)
            },
            PathStep::Column(n) => self.enter_grid(Slot::Column(n)).unwrap_or(false),
            PathStep::Row(n) => self.enter_grid(Slot::Row(n)).unwrap_or(false),
            PathStep::Shape(n) => self.move_to_first_sheet_shape().unwrap_or(false) && self.advance(n),
            PathStep::MasterPage(n) => self.move_to_master_page().unwrap_or(false) && self.advance(n),
        }
    }

    fn advance(&mut self, count: u32) -> bool {
        (0..count).all(|_| self.move_to_next_sibling())
    }
}
