//! Common style value types.
//!
//! This module provides the property value types used by every style
//! category: colors, measures, per-side properties and enumerations.

// Submodule declarations
pub mod color;
pub mod directional;
pub mod kinds;
pub mod measure;

// Re-exports
pub use color::Color;
pub use directional::DirectionalStyle;
pub use kinds::{
    FontStyle, FontWeight, HorizontalAlign, PrintOrientation, TextAlign, TextWrap, VerticalAlign,
};
pub use measure::{LengthUnit, Measure};
