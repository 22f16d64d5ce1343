/// Formula simplification primitives
///
/// Two entry points mirror the two competition categories: a generic
/// constant-fold/flatten rewrite for cardinality formulas, and a
/// fireability-specialized pass that normalizes transition sets before
/// handing off to the generic rewrite. Neither supports cancellation;
/// callers that need a time bound must race them externally.
use crate::config::types::{ReportError, Result};
use crate::formula::ast::{Expr, Formula};

/// Generic bottom-up simplification.
///
/// Rewrites applied, each preserving logical equivalence:
/// empty And is true, empty Or is false, singleton And/Or collapse,
/// absorbing constants short-circuit, neutral constants drop out,
/// double negation cancels, constant comparisons fold.
pub fn simplify(formula: Formula) -> Formula {
    match formula {
        Formula::Not(inner) => match simplify(*inner) {
            Formula::Constant(b) => Formula::Constant(!b),
            Formula::Not(f) => *f,
            f => Formula::Not(Box::new(f)),
        },
        Formula::And(args) => {
            let mut out = Vec::with_capacity(args.len());
            for arg in args {
                match simplify(arg) {
                    Formula::Constant(false) => return Formula::Constant(false),
                    Formula::Constant(true) => {}
                    // Flatten nested conjunctions
                    Formula::And(inner) => out.extend(inner),
                    f => out.push(f),
                }
            }
            match out.len() {
                0 => Formula::Constant(true),
                1 => out.into_iter().next().unwrap(),
                _ => Formula::And(out),
            }
        }
        Formula::Or(args) => {
            let mut out = Vec::with_capacity(args.len());
            for arg in args {
                match simplify(arg) {
                    Formula::Constant(true) => return Formula::Constant(true),
                    Formula::Constant(false) => {}
                    Formula::Or(inner) => out.extend(inner),
                    f => out.push(f),
                }
            }
            match out.len() {
                0 => Formula::Constant(false),
                1 => out.into_iter().next().unwrap(),
                _ => Formula::Or(out),
            }
        }
        Formula::LessThanEq(lhs, rhs) => match (fold_expr(lhs), fold_expr(rhs)) {
            (Expr::Constant(a), Expr::Constant(b)) => Formula::Constant(a <= b),
            // Token counts are non-negative, so 0 <= count always holds
            (Expr::Constant(a), rhs) if a <= 0 && is_count(&rhs) => Formula::Constant(true),
            (lhs, rhs) => Formula::LessThanEq(lhs, rhs),
        },
        f @ (Formula::Constant(_) | Formula::IsFireable(_)) => f,
    }
}

/// Fireability-specialized simplification.
///
/// Normalizes `is-fireable` atoms (duplicate transitions removed, empty
/// transition sets folded to false) before the generic rewrite. The error
/// channel reports atoms that cannot be normalized; in the current grammar
/// that cannot happen, but the bound stays in the signature because the
/// underlying decision-diagram backend reports failures through it.
pub fn bdd_fireability_simplify(formula: Formula) -> Result<Formula> {
    let normalized = normalize_fireability(formula)?;
    Ok(simplify(normalized))
}

fn normalize_fireability(formula: Formula) -> Result<Formula> {
    match formula {
        Formula::IsFireable(transitions) => {
            if transitions.iter().any(|t| t.is_empty()) {
                return Err(ReportError::Simplify(
                    "is-fireable atom names an empty transition".to_string(),
                ));
            }
            let mut seen = Vec::with_capacity(transitions.len());
            for t in transitions {
                if !seen.contains(&t) {
                    seen.push(t);
                }
            }
            if seen.is_empty() {
                // No transition can fire, the atom is vacuously false
                Ok(Formula::Constant(false))
            } else {
                Ok(Formula::IsFireable(seen))
            }
        }
        Formula::Not(inner) => Ok(Formula::Not(Box::new(normalize_fireability(*inner)?))),
        Formula::And(args) => Ok(Formula::And(
            args.into_iter()
                .map(normalize_fireability)
                .collect::<Result<Vec<_>>>()?,
        )),
        Formula::Or(args) => Ok(Formula::Or(
            args.into_iter()
                .map(normalize_fireability)
                .collect::<Result<Vec<_>>>()?,
        )),
        f @ (Formula::Constant(_) | Formula::LessThanEq(_, _)) => Ok(f),
    }
}

fn fold_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Sum(args) => {
            let mut constant = 0i64;
            let mut rest = Vec::new();
            for arg in args {
                match fold_expr(arg) {
                    Expr::Constant(c) => match constant.checked_add(c) {
                        Some(sum) => constant = sum,
                        // Sums that would overflow stay unfolded
                        None => rest.push(Expr::Constant(c)),
                    },
                    e => rest.push(e),
                }
            }
            if rest.is_empty() {
                Expr::Constant(constant)
            } else {
                if constant != 0 {
                    rest.push(Expr::Constant(constant));
                }
                if rest.len() == 1 {
                    rest.into_iter().next().unwrap()
                } else {
                    Expr::Sum(rest)
                }
            }
        }
        e => e,
    }
}

fn is_count(expr: &Expr) -> bool {
    match expr {
        Expr::TokensCount(_) => true,
        Expr::Sum(args) => args.iter().all(is_count),
        Expr::Constant(_) => false,
    }
}
