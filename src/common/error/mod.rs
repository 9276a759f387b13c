//! Unified error types for docnav.
//!
//! A single error enum is shared by the table addressing codec, the table
//! index and the document cursor so callers handle one type.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
