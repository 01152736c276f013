//! Propagation orchestration
//!
//! Validates variable bindings against a formula, then drives the symbolic
//! pipeline (differentiate, synthesize, retarget, serialize) for every
//! output row. Validation is fail-fast: no formula text is produced unless
//! the whole call can succeed, so callers never see a partially-populated
//! result.

use sigma_sheets_core::VariableBinding;
use sigma_sheets_formula::{
    derivative_set, parse_formula, synthesize, write_formula, FormulaError, Retargeter,
};
use std::collections::HashSet;
use thiserror::Error;

/// Errors surfaced by [`propagate`]
#[derive(Debug, Error, PartialEq)]
pub enum PropagationError {
    /// The variable set is empty
    #[error("No variables declared")]
    NoVariables,

    /// Two bindings share a name
    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    /// A range resolves to a different row count than the rest of the call
    #[error(
        "Range length mismatch for variable '{variable}': expected {expected} rows, got {actual}"
    )]
    RangeLengthMismatch {
        variable: String,
        expected: u32,
        actual: u32,
    },

    /// The formula failed to parse
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The formula references a variable that was not declared
    #[error("Unknown variable in formula: {0}")]
    UnknownVariable(String),

    /// A range string or variable name failed to parse at the boundary
    #[error(transparent)]
    Binding(#[from] sigma_sheets_core::Error),
}

/// Generated formulas, one entry per output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationResult {
    /// `=`-prefixed formulas computing the propagated value
    pub value_formulas: Vec<String>,
    /// `=`-prefixed formulas computing the propagated uncertainty
    pub uncertainty_formulas: Vec<String>,
}

impl PropagationResult {
    /// Number of output rows
    pub fn row_count(&self) -> usize {
        self.value_formulas.len()
    }
}

/// Generate value and uncertainty formulas for every row of the bound ranges
///
/// `row_count_hint` optionally pins the expected row count (e.g. from the
/// caller's output range); when present, every binding must match it.
///
/// Validation order, first failure wins: non-empty variable set, unique
/// names, consistent row counts, parseable formula, no undeclared variables.
/// The call is deterministic and side-effect-free: it produces formula text
/// only and never touches a spreadsheet.
pub fn propagate(
    variables: &[VariableBinding],
    formula: &str,
    row_count_hint: Option<usize>,
) -> Result<PropagationResult, PropagationError> {
    if variables.is_empty() {
        return Err(PropagationError::NoVariables);
    }

    let mut names: HashSet<&str> = HashSet::with_capacity(variables.len());
    for variable in variables {
        if !names.insert(variable.name.as_str()) {
            return Err(PropagationError::DuplicateVariable(variable.name.clone()));
        }
    }

    // Every value range and every bound uncertainty range must resolve to
    // the same row count
    let expected = match row_count_hint {
        Some(hint) => hint as u32,
        None => variables[0].values.row_count(),
    };
    for variable in variables {
        let mut counts = vec![variable.values.row_count()];
        if let Some(uncertainties) = &variable.uncertainties {
            counts.push(uncertainties.row_count());
        }
        for actual in counts {
            if actual != expected {
                return Err(PropagationError::RangeLengthMismatch {
                    variable: variable.name.clone(),
                    expected,
                    actual,
                });
            }
        }
    }

    let value_ast = parse_formula(formula)?;

    for name in value_ast.variables() {
        if !names.contains(name) {
            return Err(PropagationError::UnknownVariable(name.to_string()));
        }
    }

    log::debug!(
        "propagating '{formula}' across {expected} rows for {} variables",
        variables.len()
    );

    let derivatives = derivative_set(&value_ast, variables);
    let (value_expr, uncertainty_expr) = synthesize(&value_ast, &derivatives, variables);
    let retargeter = Retargeter::new(variables);

    let mut value_formulas = Vec::with_capacity(expected as usize);
    let mut uncertainty_formulas = Vec::with_capacity(expected as usize);

    for row in 0..expected {
        value_formulas.push(write_formula(&retargeter.retarget(&value_expr, row)?));
        uncertainty_formulas.push(write_formula(&retargeter.retarget(&uncertainty_expr, row)?));
    }

    Ok(PropagationResult {
        value_formulas,
        uncertainty_formulas,
    })
}
