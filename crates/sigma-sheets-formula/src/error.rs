//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing, retargeting or evaluating formulas
#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    /// Formula text is empty or whitespace-only
    #[error("Formula is empty")]
    EmptyExpression,

    /// Token that does not fit the grammar at this position
    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// Opening and closing parentheses do not match up
    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    /// Identifier used as a function call but not in the supported set
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Function called with the wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Variable (or σ placeholder) with no binding
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Retarget row offset outside the bound range; callers validate row
    /// counts up front, so hitting this indicates a caller bug
    #[error("Row offset {offset} is outside the bound range of {rows} rows")]
    RowOutOfRange { offset: u32, rows: u32 },

    /// Numeric evaluation failure (unbound cell, unresolved placeholder)
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}
