//! Numeric expression evaluation
//!
//! Evaluates ASTs to `f64` over explicit variable, σ and cell assignments.
//! This is a support surface for equivalence testing and previews; the
//! propagation pipeline itself only ever produces formula text, and the
//! spreadsheet engine owns user-facing numeric semantics. Arithmetic follows
//! IEEE f64 rules (division by zero yields ±∞, domain violations yield NaN).

use crate::ast::{BinaryOperator, Expr, Func, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use ahash::AHashMap;
use sigma_sheets_core::CellAddress;

/// Assignments visible to [`evaluate`]
#[derive(Debug, Default)]
pub struct EvalContext {
    vars: AHashMap<String, f64>,
    sigmas: AHashMap<String, f64>,
    cells: AHashMap<CellAddress, f64>,
}

impl EvalContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable's value
    pub fn set_var(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Bind a variable's uncertainty (resolves `Sigma` placeholders)
    pub fn set_sigma(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.sigmas.insert(name.into(), value);
        self
    }

    /// Bind a cell's value (resolves `CellRef` nodes)
    pub fn set_cell(&mut self, addr: CellAddress, value: f64) -> &mut Self {
        self.cells.insert(addr, value);
        self
    }
}

/// Evaluate an expression against the given assignments
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> FormulaResult<f64> {
    Ok(match expr {
        Expr::Number(n) => *n,

        Expr::Variable(name) => *ctx
            .vars
            .get(name)
            .ok_or_else(|| FormulaError::UnknownVariable(name.clone()))?,

        Expr::Sigma(name) => *ctx.sigmas.get(name).ok_or_else(|| {
            FormulaError::Evaluation(format!("no uncertainty bound for '{name}'"))
        })?,

        Expr::CellRef(addr) => *ctx.cells.get(addr).ok_or_else(|| {
            FormulaError::Evaluation(format!("no value bound for cell {addr}"))
        })?,

        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => -evaluate(operand, ctx)?,

        Expr::BinaryOp { op, left, right } => {
            let l = evaluate(left, ctx)?;
            let r = evaluate(right, ctx)?;
            match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
                BinaryOperator::Power => l.powf(r),
            }
        }

        Expr::Call { func, args } => {
            let first = evaluate(&args[0], ctx)?;
            match func {
                Func::Sqrt => first.sqrt(),
                Func::Sin => first.sin(),
                Func::Cos => first.cos(),
                Func::Tan => first.tan(),
                Func::Exp => first.exp(),
                Func::Ln => first.ln(),
                Func::Log => first.log10(),
                Func::Abs => first.abs(),
                Func::Pow => first.powf(evaluate(&args[1], ctx)?),
            }
        }
    })
}
