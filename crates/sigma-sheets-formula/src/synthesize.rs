//! Uncertainty formula synthesis
//!
//! Combines a value expression and its partial derivatives into the
//! first-order Gaussian error propagation form
//! `sqrt( Σ_i (∂f/∂x_i * σ_x_i)^2 )`.

use crate::ast::{Expr, Func};
use crate::derivative::DerivativeSet;
use sigma_sheets_core::VariableBinding;

/// Build the value and uncertainty expressions for a propagation call
///
/// The value expression is the input formula unchanged. The uncertainty
/// expression sums one `(∂f/∂x_i * σ_x_i)^2` term per declared variable,
/// in declaration order, skipping variables that either have no bound
/// uncertainty range (their σ is the literal zero) or whose partial is the
/// zero constant (the term would contribute nothing). When no term
/// survives, the uncertainty collapses to the zero constant.
pub fn synthesize(
    value: &Expr,
    derivatives: &DerivativeSet,
    bindings: &[VariableBinding],
) -> (Expr, Expr) {
    let mut sum: Option<Expr> = None;

    for binding in bindings {
        if binding.uncertainties.is_none() {
            continue;
        }
        let Some(partial) = derivatives.get(&binding.name) else {
            continue;
        };
        if partial.is_zero() {
            continue;
        }

        let term = Expr::pow(
            Expr::mul(partial.clone(), Expr::Sigma(binding.name.clone())),
            Expr::Number(2.0),
        );
        sum = Some(match sum {
            Some(acc) => Expr::add(acc, term),
            None => term,
        });
    }

    let uncertainty = match sum {
        Some(total) => Expr::call1(Func::Sqrt, total),
        None => Expr::Number(0.0),
    };

    (value.clone(), uncertainty)
}
