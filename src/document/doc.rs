//! A navigable document over one backend.
//!
//! [`Document`] pairs an [`ElementAdapter`] with the table indexes built for
//! its tables and sheets. Indexes are built on first use and kept for the
//! lifetime of the document, so every cursor entering the same table shares
//! one immutable [`TableIndex`].
//!
//! # Example
//!
//! ```rust
//! use docnav::document::{Document, ElementTree, ElementType};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.create_root(ElementType::Root);
//! let table = tree.append_child(root, ElementType::Table).unwrap();
//! let row = tree.append_child(table, ElementType::TableRow).unwrap();
//! tree.append_child(row, ElementType::TableCell).unwrap();
//!
//! let doc = Document::new(tree);
//! let index = doc.table_index(table).unwrap();
//! assert_eq!(index.dimensions().rows, 1);
//! assert!(std::sync::Arc::ptr_eq(&index, &doc.table_index(table).unwrap()));
//! ```

use super::adapter::ElementAdapter;
use super::cursor::DocumentCursor;
use super::element::{ElementHandle, ElementType};
use crate::common::{Error, Result};
use crate::table::TableIndex;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A backend together with the grid indexes built for its tables and sheets.
///
/// Cursors borrow the document; any number of them may walk it at once.
pub struct Document<A> {
    adapter: A,
    /// Built indexes by table or sheet element (lazy, thread-safe via parking_lot RwLock)
    tables: RwLock<HashMap<ElementHandle, Arc<TableIndex>>>,
}

impl<A: ElementAdapter> Document<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            tables: RwLock::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Give the backend back, dropping every cached index.
    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// The root element.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] when the backend has no root.
    pub fn root(&self) -> Result<ElementHandle> {
        self.adapter
            .root()
            .ok_or_else(|| Error::InvalidDocument("Backend produced no root element".to_string()))
    }

    /// A cursor positioned at the root.
    pub fn cursor(&self) -> Result<DocumentCursor<'_, A>> {
        DocumentCursor::new(self)
    }

    /// The grid index of a table or sheet element, built on first request.
    ///
    /// # Errors
    ///
    /// [`Error::NotATable`] when the element is neither a table nor a sheet,
    /// or when the backend does not describe its grid.
    pub fn table_index(&self, element: ElementHandle) -> Result<Arc<TableIndex>> {
        if let Some(index) = self.tables.read().get(&element) {
            return Ok(Arc::clone(index));
        }

        let kind = self.adapter.element_type(element);
        if !kind.is_table_like() {
            return Err(Error::NotATable(kind));
        }
        // A table-like kind whose backend exposes no grid lacks the capability.
        let index = match kind {
            ElementType::Sheet => self.adapter.sheet(element).map(|l| TableIndex::build_sheet(&l)),
            _ => self.adapter.table(element).map(|l| TableIndex::build(&l)),
        }
        .ok_or(Error::NotATable(kind))?;

        debug!(%element, ?kind, "cached table index");
        // Another thread may have built the same index meanwhile; keep the first.
        let mut tables = self.tables.write();
        let index = tables.entry(element).or_insert_with(|| Arc::new(index));
        Ok(Arc::clone(index))
    }

    /// Number of table indexes built so far.
    pub fn cached_tables(&self) -> usize {
        self.tables.read().len()
    }
}

impl<A: ElementAdapter + std::fmt::Debug> std::fmt::Debug for Document<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("adapter", &self.adapter)
            .field("cached_tables", &self.cached_tables())
            .finish()
    }
}
