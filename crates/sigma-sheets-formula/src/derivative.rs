//! Symbolic differentiation
//!
//! Total over the supported AST grammar: every node the parser can produce
//! has a differentiation rule, so this module never fails. Subtrees that do
//! not contain the target variable short-circuit to the zero constant
//! structurally, which keeps derivative ASTs from ballooning. No further
//! algebraic simplification is performed (no constant folding, no `x*1`
//! rewriting); simplification is cosmetic, not correctness-affecting.

use crate::ast::{BinaryOperator, Expr, Func, UnaryOperator};
use ahash::AHashMap;
use sigma_sheets_core::VariableBinding;

/// Partial derivatives keyed by variable name, one entry per declared
/// variable (the zero constant included)
pub type DerivativeSet = AHashMap<String, Expr>;

/// Compute the partial derivative of `expr` with respect to `var`
pub fn differentiate(expr: &Expr, var: &str) -> Expr {
    // Structural short-circuit: anything not mentioning the variable is a
    // constant with derivative zero
    if !expr.references(var) {
        return Expr::Number(0.0);
    }

    match expr {
        // references() returned true, so the name matches
        Expr::Variable(_) => Expr::Number(1.0),

        // Unreachable past the guard above, but the rules stay total
        Expr::Number(_) | Expr::Sigma(_) | Expr::CellRef(_) => Expr::Number(0.0),

        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => Expr::neg(differentiate(operand, var)),

        Expr::BinaryOp { op, left, right } => match op {
            BinaryOperator::Add => Expr::add(differentiate(left, var), differentiate(right, var)),
            BinaryOperator::Subtract => {
                Expr::sub(differentiate(left, var), differentiate(right, var))
            }
            // d(f*g) = f'*g + f*g'
            BinaryOperator::Multiply => Expr::add(
                Expr::mul(differentiate(left, var), (**right).clone()),
                Expr::mul((**left).clone(), differentiate(right, var)),
            ),
            // d(f/g) = (f'*g - f*g') / g^2
            BinaryOperator::Divide => Expr::div(
                Expr::sub(
                    Expr::mul(differentiate(left, var), (**right).clone()),
                    Expr::mul((**left).clone(), differentiate(right, var)),
                ),
                Expr::pow((**right).clone(), Expr::Number(2.0)),
            ),
            BinaryOperator::Power => differentiate_power(left, right, var),
        },

        Expr::Call { func, args } => differentiate_call(*func, args, var),
    }
}

/// Power rule, covering both the constant-exponent and the general case
fn differentiate_power(base: &Expr, exponent: &Expr, var: &str) -> Expr {
    let dbase = differentiate(base, var);

    if !exponent.references(var) {
        // d(f^c) = c * f^(c-1) * f'; a literal exponent yields a literal c-1
        let reduced = match exponent {
            Expr::Number(n) => Expr::Number(n - 1.0),
            other => Expr::sub(other.clone(), Expr::Number(1.0)),
        };
        Expr::mul(
            Expr::mul(exponent.clone(), Expr::pow(base.clone(), reduced)),
            dbase,
        )
    } else {
        // Logarithmic differentiation: d(f^g) = f^g * (g'*ln(f) + g*f'/f)
        let dexp = differentiate(exponent, var);
        Expr::mul(
            Expr::pow(base.clone(), exponent.clone()),
            Expr::add(
                Expr::mul(dexp, Expr::call1(Func::Ln, base.clone())),
                Expr::div(Expr::mul(exponent.clone(), dbase), base.clone()),
            ),
        )
    }
}

/// Chain rule for the supported function set
fn differentiate_call(func: Func, args: &[Expr], var: &str) -> Expr {
    if func == Func::Pow {
        return differentiate_power(&args[0], &args[1], var);
    }

    let inner = &args[0];
    let dinner = differentiate(inner, var);

    match func {
        // d(sqrt(f)) = f' / (2*sqrt(f))
        Func::Sqrt => Expr::div(
            dinner,
            Expr::mul(Expr::Number(2.0), Expr::call1(Func::Sqrt, inner.clone())),
        ),
        // d(sin(f)) = cos(f) * f'
        Func::Sin => Expr::mul(Expr::call1(Func::Cos, inner.clone()), dinner),
        // d(cos(f)) = -sin(f) * f'
        Func::Cos => Expr::mul(Expr::neg(Expr::call1(Func::Sin, inner.clone())), dinner),
        // d(tan(f)) = f' / cos(f)^2
        Func::Tan => Expr::div(
            dinner,
            Expr::pow(Expr::call1(Func::Cos, inner.clone()), Expr::Number(2.0)),
        ),
        // d(exp(f)) = exp(f) * f'
        Func::Exp => Expr::mul(Expr::call1(Func::Exp, inner.clone()), dinner),
        // d(ln(f)) = f' / f
        Func::Ln => Expr::div(dinner, inner.clone()),
        // d(log10(f)) = f' / (f * ln(10))
        Func::Log => Expr::div(
            dinner,
            Expr::mul(inner.clone(), Expr::call1(Func::Ln, Expr::Number(10.0))),
        ),
        // d(|f|) = f/|f| * f'
        Func::Abs => Expr::mul(
            Expr::div(inner.clone(), Expr::call1(Func::Abs, inner.clone())),
            dinner,
        ),
        // Handled above
        Func::Pow => Expr::Number(0.0),
    }
}

/// Compute the partial derivative with respect to every declared variable
pub fn derivative_set(expr: &Expr, bindings: &[VariableBinding]) -> DerivativeSet {
    bindings
        .iter()
        .map(|binding| (binding.name.clone(), differentiate(expr, &binding.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{evaluate, EvalContext};
    use crate::parser::parse_formula;

    fn diff(formula: &str, var: &str) -> Expr {
        differentiate(&parse_formula(formula).unwrap(), var)
    }

    /// Evaluate a derivative at a point and compare against the expected
    /// closed form
    fn assert_diff_at(formula: &str, var: &str, point: &[(&str, f64)], expected: f64) {
        let derivative = diff(formula, var);
        let mut ctx = EvalContext::new();
        for (name, value) in point {
            ctx.set_var(*name, *value);
        }
        let got = evaluate(&derivative, &ctx).unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "d({formula})/d{var} at {point:?}: got {got}, expected {expected}"
        );
    }

    #[test]
    fn test_variable_and_constant() {
        assert_eq!(diff("x", "x"), Expr::Number(1.0));
        assert_eq!(diff("x", "y"), Expr::Number(0.0));
        assert_eq!(diff("5", "x"), Expr::Number(0.0));
    }

    #[test]
    fn test_zero_subtree_short_circuit() {
        // The whole untouched subtree collapses to a single zero constant,
        // not a tree of zeros
        let derivative = diff("sin(y)*cos(y) + x", "x");
        assert_eq!(
            derivative,
            Expr::add(Expr::Number(0.0), Expr::Number(1.0))
        );
    }

    #[test]
    fn test_sum_rule() {
        assert_diff_at("x+y", "x", &[("x", 2.0), ("y", 3.0)], 1.0);
        assert_diff_at("x-y", "y", &[("x", 2.0), ("y", 3.0)], -1.0);
    }

    #[test]
    fn test_product_rule() {
        // d(x*y)/dx = y
        assert_diff_at("x*y", "x", &[("x", 2.0), ("y", 3.0)], 3.0);
        // d(x^2*x)/dx = 3x^2
        assert_diff_at("x^2*x", "x", &[("x", 2.0)], 12.0);
    }

    #[test]
    fn test_quotient_rule() {
        // d(x/y)/dx = 1/y
        assert_diff_at("x/y", "x", &[("x", 6.0), ("y", 3.0)], 1.0 / 3.0);
        // d(x/y)/dy = -x/y^2
        assert_diff_at("x/y", "y", &[("x", 6.0), ("y", 3.0)], -6.0 / 9.0);
    }

    #[test]
    fn test_power_rule_constant_exponent() {
        // d(x^3)/dx = 3x^2
        assert_diff_at("x^3", "x", &[("x", 2.0)], 12.0);
        // Literal exponent yields a literal c-1
        let derivative = diff("x^3", "x");
        assert_eq!(
            derivative,
            Expr::mul(
                Expr::mul(
                    Expr::Number(3.0),
                    Expr::pow(Expr::Variable("x".into()), Expr::Number(2.0)),
                ),
                Expr::Number(1.0),
            )
        );
    }

    #[test]
    fn test_power_rule_symbolic_constant_exponent() {
        // d(x^y)/dx = y*x^(y-1) when y does not depend on x
        assert_diff_at("x^y", "x", &[("x", 2.0), ("y", 3.0)], 12.0);
    }

    #[test]
    fn test_general_power_logarithmic() {
        // d(x^x)/dx = x^x * (ln(x) + 1)
        let x = 1.5f64;
        let expected = x.powf(x) * (x.ln() + 1.0);
        assert_diff_at("x^x", "x", &[("x", x)], expected);
    }

    #[test]
    fn test_pow_call_matches_caret() {
        assert_diff_at("pow(x, 3)", "x", &[("x", 2.0)], 12.0);
    }

    #[test]
    fn test_chain_rules() {
        let x = 0.7f64;

        // d(sqrt(x))/dx = 1/(2*sqrt(x))
        assert_diff_at("sqrt(x)", "x", &[("x", x)], 0.5 / x.sqrt());
        // d(sin(2x))/dx = 2*cos(2x)
        assert_diff_at("sin(2*x)", "x", &[("x", x)], 2.0 * (2.0 * x).cos());
        // d(cos(x))/dx = -sin(x)
        assert_diff_at("cos(x)", "x", &[("x", x)], -x.sin());
        // d(tan(x))/dx = 1/cos(x)^2
        assert_diff_at("tan(x)", "x", &[("x", x)], 1.0 / x.cos().powi(2));
        // d(exp(x^2))/dx = 2x*exp(x^2)
        assert_diff_at("exp(x^2)", "x", &[("x", x)], 2.0 * x * (x * x).exp());
        // d(ln(x))/dx = 1/x
        assert_diff_at("ln(x)", "x", &[("x", x)], 1.0 / x);
        // d(log(x))/dx = 1/(x*ln(10))
        assert_diff_at("log(x)", "x", &[("x", x)], 1.0 / (x * 10f64.ln()));
        // d(abs(x))/dx = -1 for negative x
        assert_diff_at("abs(x)", "x", &[("x", -2.0)], -1.0);
    }

    #[test]
    fn test_derivative_set_covers_all_bindings() {
        use sigma_sheets_core::ColumnRange;

        let bindings = vec![
            VariableBinding::new("x", ColumnRange::parse("A1:A3").unwrap(), None).unwrap(),
            VariableBinding::new("y", ColumnRange::parse("B1:B3").unwrap(), None).unwrap(),
        ];
        let expr = parse_formula("x^2").unwrap();
        let derivatives = derivative_set(&expr, &bindings);

        assert_eq!(derivatives.len(), 2);
        assert!(!derivatives["x"].is_zero());
        assert!(derivatives["y"].is_zero());
    }
}
