//! Variable bindings: single-column ranges holding per-row values and
//! uncertainties

use crate::address::{CellAddress, CellRange};
use crate::error::{Error, Result};

/// A contiguous single-column span of cells
///
/// Variable bindings are one-dimensional: a column of N values, optionally
/// paired with a column of N uncertainties. `ColumnRange` enforces the
/// single-column shape at construction so the propagation pipeline never has
/// to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// Column index (0-based)
    pub col: u16,
    /// First row (0-based, inclusive)
    pub start_row: u32,
    /// Last row (0-based, inclusive)
    pub end_row: u32,
}

impl ColumnRange {
    /// Create a new column range; rows are swapped into order if needed
    pub fn new(col: u16, start_row: u32, end_row: u32) -> Self {
        Self {
            col,
            start_row: start_row.min(end_row),
            end_row: start_row.max(end_row),
        }
    }

    /// Build from a general range, rejecting multi-column spans
    pub fn from_range(range: CellRange) -> Result<Self> {
        if range.col_count() != 1 {
            return Err(Error::MultiColumnRange(range.to_a1_string()));
        }
        Ok(Self {
            col: range.start.col,
            start_row: range.start.row,
            end_row: range.end.row,
        })
    }

    /// Parse from "A1:A10" notation (or a bare "A7" for a one-row span)
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_range(CellRange::parse(s)?)
    }

    /// Number of rows in the span
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// The cell at a 0-based row offset from the top of the span, or `None`
    /// past the end
    pub fn cell_at(&self, offset: u32) -> Option<CellAddress> {
        let row = self.start_row.checked_add(offset)?;
        if row <= self.end_row {
            Some(CellAddress::new(row, self.col))
        } else {
            None
        }
    }

    /// Format as an "A1:A10" string
    pub fn to_a1_string(&self) -> String {
        CellRange::new(
            CellAddress::new(self.start_row, self.col),
            CellAddress::new(self.end_row, self.col),
        )
        .to_a1_string()
    }
}

/// An input variable bound to spreadsheet ranges
///
/// Immutable once propagation validation starts. `uncertainties` is `None`
/// for variables measured without error; their σ terms drop out of the
/// propagated uncertainty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    /// Variable name as it appears in formulas (exact, case-sensitive)
    pub name: String,
    /// Column holding the per-row values
    pub values: ColumnRange,
    /// Column holding the per-row uncertainties, if any
    pub uncertainties: Option<ColumnRange>,
}

impl VariableBinding {
    /// Create a binding, validating the variable name
    pub fn new(
        name: impl Into<String>,
        values: ColumnRange,
        uncertainties: Option<ColumnRange>,
    ) -> Result<Self> {
        let name = name.into();
        if !is_valid_variable_name(&name) {
            return Err(Error::InvalidVariableName(name));
        }
        Ok(Self {
            name,
            values,
            uncertainties,
        })
    }
}

/// Check that a name is a plain identifier: an ASCII letter followed by
/// letters, digits or underscores
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
