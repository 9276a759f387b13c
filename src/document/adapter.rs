//! The contract every format backend implements.
//!
//! A backend (ODF, OOXML, legacy binary, ...) owns its parsed tree and answers
//! structural and style questions about elements by handle. The cursor and
//! the table index only ever talk to a backend through this trait.

use super::element::{ElementHandle, ElementType};
use crate::style::{PageLayout, ResolvedStyle};
use crate::table::{SheetLayout, TableLayout};

/// Structural and style access to one backend's element tree.
///
/// Structural accessors return `None` when the relation does not exist.
/// Capability accessors return `None` when the element does not offer it.
pub trait ElementAdapter {
    /// The root element, if the backend produced one.
    fn root(&self) -> Option<ElementHandle>;

    fn element_type(&self, element: ElementHandle) -> ElementType;

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle>;
    fn first_child(&self, element: ElementHandle) -> Option<ElementHandle>;
    fn previous_sibling(&self, element: ElementHandle) -> Option<ElementHandle>;
    fn next_sibling(&self, element: ElementHandle) -> Option<ElementHandle>;

    /// The style the element itself declares, not merged with its ancestors.
    fn partial_style(&self, element: ElementHandle) -> ResolvedStyle;

    /// Structure of a table element. Sheets report their grid through
    /// [`sheet`](Self::sheet) instead.
    fn table(&self, _element: ElementHandle) -> Option<TableLayout> {
        None
    }

    /// Structure of a sheet element.
    fn sheet(&self, _element: ElementHandle) -> Option<SheetLayout> {
        None
    }

    /// Master page referenced by a slide or page.
    fn master_page(&self, _element: ElementHandle) -> Option<ElementHandle> {
        None
    }

    /// Page geometry of a page or master page.
    fn page_layout(&self, _element: ElementHandle) -> Option<PageLayout> {
        None
    }
}

impl<A: ElementAdapter + ?Sized> ElementAdapter for &A {
    fn root(&self) -> Option<ElementHandle> {
        (**self).root()
    }

    fn element_type(&self, element: ElementHandle) -> ElementType {
        (**self).element_type(element)
    }

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        (**self).parent(element)
    }

    fn first_child(&self, element: ElementHandle) -> Option<ElementHandle> {
        (**self).first_child(element)
    }

    fn previous_sibling(&self, element: ElementHandle) -> Option<ElementHandle> {
        (**self).previous_sibling(element)
    }

    fn next_sibling(&self, element: ElementHandle) -> Option<ElementHandle> {
        (**self).next_sibling(element)
    }

    fn partial_style(&self, element: ElementHandle) -> ResolvedStyle {
        (**self).partial_style(element)
    }

    fn table(&self, element: ElementHandle) -> Option<TableLayout> {
        (**self).table(element)
    }

    fn sheet(&self, element: ElementHandle) -> Option<SheetLayout> {
        (**self).sheet(element)
    }

    fn master_page(&self, element: ElementHandle) -> Option<ElementHandle> {
        (**self).master_page(element)
    }

    fn page_layout(&self, element: ElementHandle) -> Option<PageLayout> {
        (**self).page_layout(element)
    }
}
