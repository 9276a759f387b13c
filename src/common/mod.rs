//! Common types shared across the crate.
//!
//! This module provides the unified error type and the style value types used
//! by the style resolver, the table layer and the document cursor.

// Submodule declarations
pub mod error;
pub mod style;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{
    Color, DirectionalStyle, FontStyle, FontWeight, HorizontalAlign, LengthUnit, Measure,
    PrintOrientation, TextAlign, TextWrap, VerticalAlign,
};
