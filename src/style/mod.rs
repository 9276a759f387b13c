//! Style resolution.
//!
//! Styles are gathered per scope (document defaults, paragraph, span, table
//! cell, ...) and cascaded by merging each more specific scope into the style
//! already resolved for its ancestors. The document cursor does this once per
//! move, so the style at any position is available without walking back to
//! the root.

pub mod page;
pub mod resolved;

pub use page::PageLayout;
pub use resolved::{
    GraphicStyle, Override, ParagraphStyle, ResolvedStyle, TableCellStyle, TableColumnStyle,
    TableRowStyle, TableStyle, TextStyle, override_style,
};
