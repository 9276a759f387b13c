//! Docnav - uniform navigation over office documents
//!
//! This library turns the element trees of heterogeneous office-document
//! backends (ODF, OOXML, legacy binary) into one navigable model with
//! cascading styles and random-access tables.
//!
//! # Features
//!
//! - **Document cursor**: copyable tree walker whose style is cascaded
//!   incrementally, one merge per move
//! - **Style resolver**: field-wise override of partial styles across seven
//!   categories (text, paragraph, table, column, row, cell, graphic)
//! - **Table index**: random access into span and repeat compressed table
//!   markup without materializing the dense grid
//! - **A1 addressing**: spreadsheet coordinates and ranges (`B3`, `A1:C55`)
//!
//! # Example - Walking a document
//!
//! ```
//! use docnav::{Document, ElementTree, ElementType, Measure, ResolvedStyle, TextStyle};
//!
//! # fn main() -> docnav::Result<()> {
//! let mut tree = ElementTree::new();
//! let root = tree.create_root(ElementType::Root);
//! tree.set_style(
//!     root,
//!     ResolvedStyle {
//!         text: Some(TextStyle {
//!             font_size: Some(Measure::pt(11.0)),
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     },
//! )?;
//! let paragraph = tree.append_child(root, ElementType::Paragraph)?;
//! let text = tree.append_child(paragraph, ElementType::Text)?;
//! tree.set_text(text, "Hello")?;
//!
//! let doc = Document::new(tree);
//! let mut cursor = doc.cursor()?;
//! cursor.move_to_str("/child:0/child:0")?;
//!
//! // Inherited from the root
//! let size = cursor.current_style().text.as_ref().and_then(|t| t.font_size);
//! assert_eq!(size, Some(Measure::pt(11.0)));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Table addressing
//!
//! ```
//! use docnav::{TablePosition, TableRange};
//!
//! let position: TablePosition = "AB12".parse().unwrap();
//! assert_eq!((position.row(), position.column()), (11, 27));
//!
//! let range: TableRange = "A1:C55".parse().unwrap();
//! assert_eq!(range.to_string(), "A1:C55");
//! ```

pub mod common;
pub mod config;
pub mod document;
pub mod style;
pub mod table;

pub use common::{Color, Error, Measure, Result};
pub use config::SheetWindow;
pub use document::{
    Document, DocumentCursor, DocumentPath, ElementAdapter, ElementHandle, ElementTree, ElementType,
    PathStep,
};
pub use style::{PageLayout, ResolvedStyle, TextStyle, override_style};
pub use table::{TableCursor, TableDimensions, TableIndex, TablePosition, TableRange};
