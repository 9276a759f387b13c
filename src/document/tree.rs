//! Arena-backed element tree.
//!
//! [`ElementTree`] owns every node of a document in one vector and links them
//! by index. Backends that parse into memory can build one of these and get
//! the [`ElementAdapter`] contract for free; handles stay valid for as long as
//! the tree lives and never dangle.

use super::adapter::ElementAdapter;
use super::element::{ElementHandle, ElementType};
use crate::common::{Error, Result};
use crate::style::{PageLayout, ResolvedStyle};
use crate::table::{CellMarkup, ColumnMarkup, RowMarkup, SheetLayout, TableLayout};

#[derive(Debug, Clone)]
struct Node {
    kind: ElementType,
    parent: Option<ElementHandle>,
    first_child: Option<ElementHandle>,
    last_child: Option<ElementHandle>,
    previous: Option<ElementHandle>,
    next: Option<ElementHandle>,
    /// Drawing shapes of a sheet, chained separately from the grid children
    first_shape: Option<ElementHandle>,
    last_shape: Option<ElementHandle>,
    style: ResolvedStyle,
    text: Option<String>,
    repeat: u32,
    colspan: u32,
    rowspan: u32,
    covered: bool,
    master_page: Option<ElementHandle>,
    page_layout: Option<PageLayout>,
}

impl Node {
    fn new(kind: ElementType, parent: Option<ElementHandle>) -> Self {
        Self {
            kind,
            parent,
            first_child: None,
            last_child: None,
            previous: None,
            next: None,
            first_shape: None,
            last_shape: None,
            style: ResolvedStyle::default(),
            text: None,
            repeat: 1,
            colspan: 1,
            rowspan: 1,
            covered: false,
            master_page: None,
            page_layout: None,
        }
    }
}

/// A document tree stored as an arena of nodes.
///
/// # Examples
///
/// ```
/// use docnav::document::{ElementAdapter, ElementTree, ElementType};
///
/// let mut tree = ElementTree::new();
/// let root = tree.create_root(ElementType::Root);
/// let paragraph = tree.append_child(root, ElementType::Paragraph).unwrap();
/// let text = tree.append_child(paragraph, ElementType::Text).unwrap();
/// tree.set_text(text, "Hello").unwrap();
///
/// assert_eq!(tree.first_child(root), Some(paragraph));
/// assert_eq!(tree.parent(text), Some(paragraph));
/// assert_eq!(tree.text(text), Some("Hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<Node>,
    root: Option<ElementHandle>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create the root node. A second call replaces the root; the old one
    /// stays in the arena, detached.
    pub fn create_root(&mut self, kind: ElementType) -> ElementHandle {
        let root = self.push(Node::new(kind, None));
        self.root = Some(root);
        root
    }

    /// Append a structural child at the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementHandle, kind: ElementType) -> Result<ElementHandle> {
        let previous = self.node(parent)?.last_child;
        let child = self.push(Node::new(kind, Some(parent)));
        self.link_after(previous, child);

        let parent = &mut self.nodes[parent.index()];
        parent.first_child.get_or_insert(child);
        parent.last_child = Some(child);
        Ok(child)
    }

    /// Append a drawing shape to a sheet. Shapes are siblings of each other,
    /// not of the sheet's rows and columns.
    ///
    /// Only drawing kinds ([`ElementType::is_shape`]) are accepted.
    pub fn append_sheet_shape(&mut self, sheet: ElementHandle, kind: ElementType) -> Result<ElementHandle> {
        let node = self.node(sheet)?;
        if node.kind != ElementType::Sheet {
            return Err(Error::NotASheet(node.kind));
        }
        if !kind.is_shape() {
            return Err(Error::InvalidArgument(format!(
                "{:?} cannot be placed on a sheet as a shape",
                kind
            )));
        }
        let previous = node.last_shape;
        let shape = self.push(Node::new(kind, Some(sheet)));
        self.link_after(previous, shape);

        let sheet = &mut self.nodes[sheet.index()];
        sheet.first_shape.get_or_insert(shape);
        sheet.last_shape = Some(shape);
        Ok(shape)
    }

    /// Create a detached master page. Attach content with
    /// [`append_child`](Self::append_child) and reference it with
    /// [`set_master_page`](Self::set_master_page).
    pub fn add_master_page(&mut self) -> ElementHandle {
        self.push(Node::new(ElementType::MasterPage, None))
    }

    pub fn set_master_page(&mut self, page: ElementHandle, master: ElementHandle) -> Result<()> {
        self.node(master)?;
        self.node_mut(page)?.master_page = Some(master);
        Ok(())
    }

    /// Set the style the element declares itself.
    pub fn set_style(&mut self, element: ElementHandle, style: ResolvedStyle) -> Result<()> {
        self.node_mut(element)?.style = style;
        Ok(())
    }

    pub fn set_text(&mut self, element: ElementHandle, text: impl Into<String>) -> Result<()> {
        self.node_mut(element)?.text = Some(text.into());
        Ok(())
    }

    /// Repeat count of a table column, row or cell.
    pub fn set_repeat(&mut self, element: ElementHandle, repeat: u32) -> Result<()> {
        self.node_mut(element)?.repeat = repeat;
        Ok(())
    }

    /// Column and row span of a table cell.
    pub fn set_span(&mut self, element: ElementHandle, colspan: u32, rowspan: u32) -> Result<()> {
        let node = self.node_mut(element)?;
        node.colspan = colspan;
        node.rowspan = rowspan;
        Ok(())
    }

    /// Mark a cell as a covered placeholder (ODF `table:covered-table-cell`).
    /// Covered cells are kept in the tree but take no grid position.
    pub fn set_covered(&mut self, element: ElementHandle, covered: bool) -> Result<()> {
        self.node_mut(element)?.covered = covered;
        Ok(())
    }

    pub fn set_page_layout(&mut self, element: ElementHandle, layout: PageLayout) -> Result<()> {
        self.node_mut(element)?.page_layout = Some(layout);
        Ok(())
    }

    pub fn text(&self, element: ElementHandle) -> Option<&str> {
        self.nodes.get(element.index())?.text.as_deref()
    }

    /// Structural children of `element`, in order.
    pub fn children(&self, element: ElementHandle) -> impl Iterator<Item = ElementHandle> + '_ {
        let first = self.nodes.get(element.index()).and_then(|n| n.first_child);
        std::iter::successors(first, move |&child| self.nodes[child.index()].next)
    }

    fn push(&mut self, node: Node) -> ElementHandle {
        let handle = ElementHandle::new(self.nodes.len());
        self.nodes.push(node);
        handle
    }

    fn link_after(&mut self, previous: Option<ElementHandle>, element: ElementHandle) {
        if let Some(previous) = previous {
            self.nodes[previous.index()].next = Some(element);
            self.nodes[element.index()].previous = Some(previous);
        }
    }

    fn node(&self, element: ElementHandle) -> Result<&Node> {
        self.nodes
            .get(element.index())
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown element {}", element)))
    }

    fn node_mut(&mut self, element: ElementHandle) -> Result<&mut Node> {
        self.nodes
            .get_mut(element.index())
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown element {}", element)))
    }

    fn has_content(&self, element: ElementHandle) -> bool {
        let node = &self.nodes[element.index()];
        node.first_child.is_some() || node.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Collect column declarations and rows of a table-like element.
    fn grid(&self, element: ElementHandle) -> TableLayout {
        let mut layout = TableLayout::default();

        for child in self.children(element) {
            let node = &self.nodes[child.index()];
            match node.kind {
                ElementType::TableColumn => layout.columns.push(ColumnMarkup {
                    element: child,
                    repeat: node.repeat,
                }),
                ElementType::TableRow => layout.rows.push(RowMarkup {
                    element: child,
                    repeat: node.repeat,
                    cells: self
                        .children(child)
                        .filter(|&cell| {
                            let cell = &self.nodes[cell.index()];
                            cell.kind == ElementType::TableCell && !cell.covered
                        })
                        .map(|cell| {
                            let node = &self.nodes[cell.index()];
                            CellMarkup {
                                element: cell,
                                colspan: node.colspan,
                                rowspan: node.rowspan,
                                repeat: node.repeat,
                                has_content: self.has_content(cell),
                            }
                        })
                        .collect(),
                }),
                _ => {},
            }
        }

        layout
    }
}

impl ElementAdapter for ElementTree {
    fn root(&self) -> Option<ElementHandle> {
        self.root
    }

    fn element_type(&self, element: ElementHandle) -> ElementType {
        self.nodes
            .get(element.index())
            .map_or(ElementType::None, |n| n.kind)
    }

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(element.index())?.parent
    }

    fn first_child(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(element.index())?.first_child
    }

    fn previous_sibling(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(element.index())?.previous
    }

    fn next_sibling(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(element.index())?.next
    }

    fn partial_style(&self, element: ElementHandle) -> ResolvedStyle {
        self.nodes
            .get(element.index())
            .map(|n| n.style.clone())
            .unwrap_or_default()
    }

    fn table(&self, element: ElementHandle) -> Option<TableLayout> {
        (self.element_type(element) == ElementType::Table).then(|| self.grid(element))
    }

    fn sheet(&self, element: ElementHandle) -> Option<SheetLayout> {
        let node = self.nodes.get(element.index())?;
        (node.kind == ElementType::Sheet).then(|| SheetLayout {
            grid: self.grid(element),
            first_shape: node.first_shape,
        })
    }

    fn master_page(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.nodes.get(element.index())?.master_page
    }

    fn page_layout(&self, element: ElementHandle) -> Option<PageLayout> {
        self.nodes.get(element.index())?.page_layout.clone()
    }
}
