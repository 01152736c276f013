//! # sigma-sheets-core
//!
//! Core data structures for the sigma-sheets uncertainty propagation
//! library.
//!
//! This crate provides the fundamental types used throughout sigma-sheets:
//! - [`CellAddress`] and [`CellRange`] - A1-notation cell addressing
//! - [`ColumnRange`] - validated single-column spans
//! - [`VariableBinding`] - an input variable bound to value/uncertainty
//!   columns
//!
//! ## Example
//!
//! ```rust
//! use sigma_sheets_core::{ColumnRange, VariableBinding};
//!
//! let values = ColumnRange::parse("A1:A10").unwrap();
//! let sigmas = ColumnRange::parse("B1:B10").unwrap();
//! let x = VariableBinding::new("x", values, Some(sigmas)).unwrap();
//!
//! assert_eq!(x.values.row_count(), 10);
//! assert_eq!(x.values.cell_at(2).unwrap().to_a1_string(), "A3");
//! ```

pub mod address;
pub mod binding;
pub mod error;

// Re-exports for convenience
pub use address::{CellAddress, CellRange};
pub use binding::{is_valid_variable_name, ColumnRange, VariableBinding};
pub use error::{Error, Result};

/// Maximum number of rows in a worksheet (common engine limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (common engine limit)
pub const MAX_COLS: u16 = 16_384;
