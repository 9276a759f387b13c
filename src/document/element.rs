//! Element identity and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies an element of one document.
///
/// A handle is an index into the document's node storage. It owns nothing
/// and is only meaningful together with the document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(usize);

impl ElementHandle {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a document element.
///
/// The kind decides which capability moves a cursor may attempt on the
/// element: tables and sheets expose a grid, slides and pages a master page,
/// sheets drawing shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElementType {
    #[default]
    None,

    Root,
    Slide,
    Sheet,
    Page,

    MasterPage,

    Text,
    LineBreak,
    PageBreak,
    Paragraph,
    Span,
    Link,
    Bookmark,

    List,
    ListItem,

    Table,
    TableColumn,
    TableRow,
    TableCell,

    Frame,
    Image,
    Rect,
    Line,
    Circle,
    CustomShape,

    Group,
}

impl ElementType {
    /// Elements that expose a row/column grid.
    #[inline]
    pub fn is_table_like(&self) -> bool {
        matches!(self, Self::Table | Self::Sheet)
    }

    /// Elements that may reference a master page.
    #[inline]
    pub fn has_master_page(&self) -> bool {
        matches!(self, Self::Slide | Self::Page)
    }

    /// Drawing shapes, as found floating on sheets and slides.
    #[inline]
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Frame
                | Self::Image
                | Self::Rect
                | Self::Line
                | Self::Circle
                | Self::CustomShape
                | Self::Group
        )
    }
}
