//! Cell-reference retargeting
//!
//! Rewrites symbolic variable and σ leaves into concrete per-row cell
//! references against the bound input ranges.

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use ahash::AHashMap;
use sigma_sheets_core::VariableBinding;

/// Rewrites expressions for a specific output row
///
/// Built once per propagation call; the name lookup table is shared across
/// all rows. Callers are responsible for validating the common row count up
/// front; an out-of-range offset is a caller bug, asserted in debug builds
/// and reported as [`FormulaError::RowOutOfRange`] in release builds.
pub struct Retargeter<'a> {
    bindings: AHashMap<&'a str, &'a VariableBinding>,
    rows: u32,
}

impl<'a> Retargeter<'a> {
    /// Build the lookup table over the declared bindings
    pub fn new(bindings: &'a [VariableBinding]) -> Self {
        let rows = bindings
            .iter()
            .map(|b| b.values.row_count())
            .min()
            .unwrap_or(0);
        Self {
            bindings: bindings.iter().map(|b| (b.name.as_str(), b)).collect(),
            rows,
        }
    }

    /// Rewrite every `Variable` and `Sigma` leaf into the cell reference for
    /// the given 0-based row offset
    pub fn retarget(&self, expr: &Expr, row_offset: u32) -> FormulaResult<Expr> {
        debug_assert!(
            self.rows == 0 || row_offset < self.rows,
            "row offset {row_offset} outside validated bound of {} rows",
            self.rows
        );
        self.rewrite(expr, row_offset)
    }

    fn rewrite(&self, expr: &Expr, row_offset: u32) -> FormulaResult<Expr> {
        Ok(match expr {
            Expr::Number(n) => Expr::Number(*n),
            Expr::CellRef(addr) => Expr::CellRef(*addr),

            Expr::Variable(name) => {
                let binding = self.lookup(name)?;
                let addr = binding.values.cell_at(row_offset).ok_or(
                    FormulaError::RowOutOfRange {
                        offset: row_offset,
                        rows: binding.values.row_count(),
                    },
                )?;
                Expr::CellRef(addr)
            }

            Expr::Sigma(name) => {
                let binding = self.lookup(name)?;
                match &binding.uncertainties {
                    Some(range) => {
                        let addr =
                            range
                                .cell_at(row_offset)
                                .ok_or(FormulaError::RowOutOfRange {
                                    offset: row_offset,
                                    rows: range.row_count(),
                                })?;
                        Expr::CellRef(addr)
                    }
                    // No uncertainty range bound: σ is the literal zero
                    None => Expr::Number(0.0),
                }
            }

            Expr::UnaryOp { op, operand } => Expr::UnaryOp {
                op: *op,
                operand: Box::new(self.rewrite(operand, row_offset)?),
            },

            Expr::BinaryOp { op, left, right } => Expr::BinaryOp {
                op: *op,
                left: Box::new(self.rewrite(left, row_offset)?),
                right: Box::new(self.rewrite(right, row_offset)?),
            },

            Expr::Call { func, args } => Expr::Call {
                func: *func,
                args: args
                    .iter()
                    .map(|arg| self.rewrite(arg, row_offset))
                    .collect::<FormulaResult<Vec<_>>>()?,
            },
        })
    }

    fn lookup(&self, name: &str) -> FormulaResult<&VariableBinding> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| FormulaError::UnknownVariable(name.to_string()))
    }
}
