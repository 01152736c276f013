//! Expression AST for formulas over named variables

use sigma_sheets_core::CellAddress;
use std::collections::BTreeSet;

/// A parsed formula expression
///
/// The parser produces only `Number`, `Variable`, `UnaryOp`, `BinaryOp` and
/// `Call` nodes. `Sigma` is introduced by the uncertainty synthesizer (the
/// σ placeholder for a variable's per-row uncertainty cell) and `CellRef` by
/// the retargeter; neither has surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Named variable (exact, case-sensitive spelling)
    Variable(String),
    /// Uncertainty placeholder for a variable (σ_name)
    Sigma(String),
    /// Concrete cell reference produced by retargeting
    CellRef(CellAddress),
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Function call with parse-time resolved function and checked arity
    Call { func: Func, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// The operator's surface spelling
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Power => '^',
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

/// The closed set of supported functions
///
/// Resolved once at parse time so the differentiator and writer dispatch on
/// an enum discriminant instead of comparing strings. The set mirrors the
/// spreadsheet engine's function table 1:1; anything else is a parse-time
/// `UnknownFunction` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Log,
    Abs,
    Pow,
}

impl Func {
    /// Every supported function
    pub const ALL: [Func; 9] = [
        Func::Sqrt,
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Exp,
        Func::Ln,
        Func::Log,
        Func::Abs,
        Func::Pow,
    ];

    /// Resolve a function by name, ignoring case
    pub fn from_name(name: &str) -> Option<Func> {
        Func::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// The engine spelling of the function name
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sqrt => "SQRT",
            Func::Sin => "SIN",
            Func::Cos => "COS",
            Func::Tan => "TAN",
            Func::Exp => "EXP",
            Func::Ln => "LN",
            Func::Log => "LOG",
            Func::Abs => "ABS",
            Func::Pow => "POW",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        match self {
            Func::Pow => 2,
            _ => 1,
        }
    }
}

impl Expr {
    /// Build a binary operation
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left + right`
    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOperator::Add, left, right)
    }

    /// `left - right`
    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOperator::Subtract, left, right)
    }

    /// `left * right`
    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOperator::Multiply, left, right)
    }

    /// `left / right`
    pub fn div(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinaryOperator::Divide, left, right)
    }

    /// `base ^ exponent`
    pub fn pow(base: Expr, exponent: Expr) -> Expr {
        Expr::binary(BinaryOperator::Power, base, exponent)
    }

    /// `-operand`
    pub fn neg(operand: Expr) -> Expr {
        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    /// A single-argument function call
    pub fn call1(func: Func, arg: Expr) -> Expr {
        Expr::Call {
            func,
            args: vec![arg],
        }
    }

    /// Whether the subtree contains the named variable
    ///
    /// σ placeholders do not count: they stand for per-row constants as far
    /// as differentiation is concerned.
    pub fn references(&self, var: &str) -> bool {
        match self {
            Expr::Variable(name) => name == var,
            Expr::UnaryOp { operand, .. } => operand.references(var),
            Expr::BinaryOp { left, right, .. } => left.references(var) || right.references(var),
            Expr::Call { args, .. } => args.iter().any(|a| a.references(var)),
            Expr::Number(_) | Expr::Sigma(_) | Expr::CellRef(_) => false,
        }
    }

    /// All variable names occurring in the expression, in sorted order
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Variable(name) => {
                names.insert(name.as_str());
            }
            Expr::UnaryOp { operand, .. } => operand.collect_variables(names),
            Expr::BinaryOp { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(names);
                }
            }
            Expr::Number(_) | Expr::Sigma(_) | Expr::CellRef(_) => {}
        }
    }

    /// Whether the expression is the literal zero constant
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Number(n) if *n == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_from_name() {
        assert_eq!(Func::from_name("sqrt"), Some(Func::Sqrt));
        assert_eq!(Func::from_name("SQRT"), Some(Func::Sqrt));
        assert_eq!(Func::from_name("Ln"), Some(Func::Ln));
        assert_eq!(Func::from_name("median"), None);
    }

    #[test]
    fn test_func_arity() {
        assert_eq!(Func::Pow.arity(), 2);
        for func in Func::ALL {
            if func != Func::Pow {
                assert_eq!(func.arity(), 1, "{}", func.name());
            }
        }
    }

    #[test]
    fn test_references() {
        let expr = Expr::add(
            Expr::Variable("x".into()),
            Expr::call1(Func::Sin, Expr::Variable("y".into())),
        );
        assert!(expr.references("x"));
        assert!(expr.references("y"));
        assert!(!expr.references("z"));

        // σ placeholders are constants with respect to differentiation
        assert!(!Expr::Sigma("x".into()).references("x"));
    }

    #[test]
    fn test_variables() {
        let expr = Expr::mul(
            Expr::Variable("b".into()),
            Expr::add(Expr::Variable("a".into()), Expr::Variable("b".into())),
        );
        let names: Vec<&str> = expr.variables().into_iter().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_is_zero() {
        assert!(Expr::Number(0.0).is_zero());
        assert!(!Expr::Number(1.0).is_zero());
        assert!(!Expr::Variable("x".into()).is_zero());
    }
}
