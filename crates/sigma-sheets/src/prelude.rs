//! Convenient re-exports for common usage
//!
//! ```rust
//! use sigma_sheets::prelude::*;
//! ```

pub use crate::propagation::{propagate, PropagationError, PropagationResult};
pub use crate::request::{
    handle_request, PropagationRequest, PropagationResponse, VariableSpec,
};
pub use sigma_sheets_core::{CellAddress, CellRange, ColumnRange, VariableBinding};
pub use sigma_sheets_formula::{
    differentiate, parse_formula, write_expr, write_formula, Expr, Func,
};
