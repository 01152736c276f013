//! # sigma-sheets
//!
//! Uncertainty propagation formula generation for spreadsheets.
//!
//! Given variables bound to single-column ranges (values plus optional
//! uncertainties) and a formula over them, sigma-sheets symbolically derives
//! per-row spreadsheet formulas for both the propagated value and the
//! propagated uncertainty (first-order Gaussian error propagation), ready to
//! be written into cells by the consuming engine.
//!
//! The library never touches a spreadsheet itself: a call either produces
//! the complete set of formula strings or a structured error, so the
//! consuming host can write all cells or none.
//!
//! ## Example
//!
//! ```rust
//! use sigma_sheets::prelude::*;
//!
//! let variables = vec![
//!     VariableBinding::new(
//!         "x",
//!         ColumnRange::parse("A1:A3").unwrap(),
//!         Some(ColumnRange::parse("B1:B3").unwrap()),
//!     )
//!     .unwrap(),
//!     VariableBinding::new(
//!         "y",
//!         ColumnRange::parse("C1:C3").unwrap(),
//!         Some(ColumnRange::parse("D1:D3").unwrap()),
//!     )
//!     .unwrap(),
//! ];
//!
//! let result = propagate(&variables, "x*y", None).unwrap();
//!
//! assert_eq!(result.row_count(), 3);
//! assert_eq!(result.value_formulas[0], "=A1*C1");
//! // uncertainty_formulas[0] computes sqrt((y*σx)² + (x*σy)²) over B1/D1
//! ```

pub mod prelude;
pub mod propagation;
pub mod request;

// Re-export the main entry points
pub use propagation::{propagate, PropagationError, PropagationResult};
pub use request::{handle_request, PropagationRequest, PropagationResponse, VariableSpec};

// Re-export core types
pub use sigma_sheets_core::{
    CellAddress, CellRange, ColumnRange, VariableBinding, MAX_COLS, MAX_ROWS,
};

// Re-export the symbolic pipeline for callers that drive it directly
pub use sigma_sheets_formula::{
    derivative_set, differentiate, evaluate, parse_formula, synthesize, write_expr,
    write_formula, DerivativeSet, EvalContext, Expr, FormulaError, FormulaResult, Func,
    Retargeter,
};
