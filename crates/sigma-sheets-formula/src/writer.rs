//! Formula serialization
//!
//! Renders ASTs back into spreadsheet formula text. Output is
//! over-parenthesized: every compound operand of an operator gets its own
//! parentheses, so the result reads the same under any precedence table the
//! consuming engine might use. Function names render in the engine's
//! uppercase spelling regardless of how they were typed.

use crate::ast::{Expr, UnaryOperator};

/// Serialize an expression with the leading `=` engine convention
pub fn write_formula(expr: &Expr) -> String {
    format!("={}", write_expr(expr))
}

/// Serialize an expression without the `=` prefix
pub fn write_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_into(expr, &mut out);
    out
}

fn write_into(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Number(n) => out.push_str(&format_number(*n)),
        Expr::Variable(name) => out.push_str(name),
        // Reachable only for symbolic (pre-retarget) output, e.g. previews
        Expr::Sigma(name) => {
            out.push_str("sigma_");
            out.push_str(name);
        }
        Expr::CellRef(addr) => out.push_str(&addr.to_a1_string()),

        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => {
            out.push('-');
            write_operand(operand, out);
        }

        Expr::BinaryOp { op, left, right } => {
            write_operand(left, out);
            out.push(op.symbol());
            write_operand(right, out);
        }

        Expr::Call { func, args } => {
            out.push_str(func.name());
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_into(arg, out);
            }
            out.push(')');
        }
    }
}

fn write_operand(expr: &Expr, out: &mut String) {
    if needs_parens(expr) {
        out.push('(');
        write_into(expr, out);
        out.push(')');
    } else {
        write_into(expr, out);
    }
}

/// Operands that must be wrapped to stay unambiguous under any reader
fn needs_parens(expr: &Expr) -> bool {
    match expr {
        // -2^2 is read differently by different engines; (-2)^2 is not
        Expr::Number(n) => *n < 0.0,
        Expr::Variable(_) | Expr::Sigma(_) | Expr::CellRef(_) | Expr::Call { .. } => false,
        Expr::UnaryOp { .. } | Expr::BinaryOp { .. } => true,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Func};
    use crate::parser::parse_formula;
    use pretty_assertions::assert_eq;

    fn roundtrip(formula: &str) -> String {
        write_expr(&parse_formula(formula).unwrap())
    }

    #[test]
    fn test_atoms_unparenthesized() {
        assert_eq!(roundtrip("x+y"), "x+y");
        assert_eq!(roundtrip("2*x"), "2*x");
    }

    #[test]
    fn test_compound_operands_parenthesized() {
        assert_eq!(roundtrip("(x+y)*z"), "(x+y)*z");
        assert_eq!(roundtrip("1+2*3"), "1+(2*3)");
        assert_eq!(roundtrip("x/y/z"), "(x/y)/z");
        assert_eq!(roundtrip("2^3^2"), "2^(3^2)");
    }

    #[test]
    fn test_negation() {
        assert_eq!(roundtrip("-x"), "-x");
        assert_eq!(roundtrip("-(x+y)"), "-(x+y)");
        assert_eq!(roundtrip("-x^2"), "-(x^2)");
        assert_eq!(roundtrip("x^-2"), "x^(-2)");
    }

    #[test]
    fn test_negative_literal_parenthesized() {
        let expr = Expr::pow(Expr::Number(-2.0), Expr::Number(2.0));
        assert_eq!(write_expr(&expr), "(-2)^2");
    }

    #[test]
    fn test_function_names_uppercase() {
        assert_eq!(roundtrip("sqrt(x)"), "SQRT(x)");
        assert_eq!(roundtrip("pow(x, 2)"), "POW(x,2)");
        assert_eq!(roundtrip("ln(exp(x))"), "LN(EXP(x))");
    }

    #[test]
    fn test_integral_numbers_have_no_fraction() {
        assert_eq!(write_expr(&Expr::Number(2.0)), "2");
        assert_eq!(write_expr(&Expr::Number(2.5)), "2.5");
        assert_eq!(write_expr(&Expr::Number(0.0)), "0");
    }

    #[test]
    fn test_sigma_rendering() {
        let expr = Expr::mul(
            Expr::Variable("x".into()),
            Expr::Sigma("x".into()),
        );
        assert_eq!(write_expr(&expr), "x*sigma_x");
    }

    #[test]
    fn test_formula_prefix() {
        let expr = Expr::binary(
            BinaryOperator::Add,
            Expr::Variable("x".into()),
            Expr::Number(1.0),
        );
        assert_eq!(write_formula(&expr), "=x+1");
    }

    #[test]
    fn test_writer_output_reparses() {
        for formula in [
            "x+y*z",
            "-x^2",
            "sqrt(x^2+y^2)",
            "pow(x, y)/ln(10)",
            "(a+b)/(a-b)",
        ] {
            let expr = parse_formula(formula).unwrap();
            let rendered = write_expr(&expr);
            assert!(
                parse_formula(&rendered).is_ok(),
                "'{formula}' rendered as '{rendered}' which does not reparse"
            );
        }
    }

    #[test]
    fn test_call_is_atomic_operand() {
        let expr = Expr::mul(
            Expr::call1(Func::Sin, Expr::Variable("x".into())),
            Expr::Variable("y".into()),
        );
        assert_eq!(write_expr(&expr), "SIN(x)*y");
    }
}
