//! # sigma-sheets-formula
//!
//! Formula parsing, symbolic differentiation and uncertainty synthesis for
//! sigma-sheets.
//!
//! This crate provides the symbolic pipeline:
//! - Formula parsing (text → AST) over named variables
//! - Partial differentiation (AST → AST), total over the grammar
//! - Uncertainty synthesis (root-sum-square over the partials)
//! - Cell-reference retargeting (symbolic leaves → per-row `A1` references)
//! - Serialization back to engine-ready formula text
//! - A numeric evaluator for equivalence checks and previews
//!
//! ## Example
//!
//! ```rust
//! use sigma_sheets_formula::{differentiate, parse_formula, write_expr};
//!
//! let ast = parse_formula("x^3").unwrap();
//! let dx = differentiate(&ast, "x");
//! assert_eq!(write_expr(&dx), "(3*(x^2))*1");
//! ```

pub mod ast;
pub mod derivative;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod retarget;
pub mod synthesize;
pub mod writer;

pub use ast::{BinaryOperator, Expr, Func, UnaryOperator};
pub use derivative::{derivative_set, differentiate, DerivativeSet};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvalContext};
pub use parser::parse_formula;
pub use retarget::Retargeter;
pub use synthesize::synthesize;
pub use writer::{write_expr, write_formula};
