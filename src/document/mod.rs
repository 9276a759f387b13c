//! Uniform document model and navigation.
//!
//! A format backend implements [`ElementAdapter`] over its own parsed tree.
//! Wrapping it in a [`Document`] gives [`DocumentCursor`]s that walk the tree
//! with cascaded styles and enter tables and sheets through a shared
//! [`TableIndex`](crate::table::TableIndex).
//!
//! [`ElementTree`] is an in-memory backend for documents assembled in code.
//!
//! # Example
//!
//! ```rust
//! use docnav::document::{Document, ElementTree, ElementType};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.create_root(ElementType::Root);
//! let sheet = tree.append_child(root, ElementType::Sheet).unwrap();
//! let row = tree.append_child(sheet, ElementType::TableRow).unwrap();
//! let cell = tree.append_child(row, ElementType::TableCell).unwrap();
//! tree.set_text(cell, "42").unwrap();
//!
//! let doc = Document::new(tree);
//! let mut cursor = doc.cursor().unwrap();
//! cursor.move_to_str("/child:0/row:0/child:0").unwrap();
//! assert_eq!(cursor.element(), cell);
//! ```

pub mod adapter;
pub mod cursor;
pub mod doc;
pub mod element;
pub mod path;
pub mod tree;

pub use adapter::ElementAdapter;
pub use cursor::DocumentCursor;
pub use doc::Document;
pub use element::{ElementHandle, ElementType};
pub use path::{DocumentPath, PathStep};
pub use tree::ElementTree;
