//! Unified error type for document navigation.
//!
//! Failed structural moves (parent, child, sibling) are not errors and are
//! reported as `false` by the cursor. Everything else surfaces here, always
//! carrying the offending input.
use thiserror::Error;

use crate::document::ElementType;

/// Main error type for docnav operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backend could not provide a root element
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The current element does not offer the requested navigation
    #[error("Unsupported navigation '{navigation}' on {element:?} element")]
    UnsupportedNavigation {
        element: ElementType,
        navigation: &'static str,
    },

    /// Table navigation requested on an element that is not a table
    #[error("Element is not a table: {0:?}")]
    NotATable(ElementType),

    /// Sheet navigation requested on an element that is not a sheet
    #[error("Element is not a sheet: {0:?}")]
    NotASheet(ElementType),

    /// Malformed position, range or path text, or an unknown handle
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An absolute path could not be replayed
    #[error("Path not found: '{path}' (step {step})")]
    PathNotFound { path: String, step: usize },
}

/// Result type for docnav operations.
pub type Result<T> = std::result::Result<T, Error>;
