//! Error types for sigma-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sigma-sheets-core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Variable bindings must cover exactly one column
    #[error("Range '{0}' spans more than one column; variable bindings must be a single column")]
    MultiColumnRange(String),

    /// Variable name is not a plain identifier
    #[error("Invalid variable name: '{0}' (expected an ASCII letter followed by letters, digits or '_')")]
    InvalidVariableName(String),
}
