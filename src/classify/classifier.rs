/// Query classification - pure function over a decoded query
///
/// The classification is derived entirely from the query value: polarity
/// from its `is_ef` flag, size from the structural node count. When the
/// caller opts into simplification, the bounded simplifier runs first and
/// the classification applies to whatever it returned.
use crate::classify::bounded::simplify_with_deadline;
use crate::config::types::*;
use crate::formula::ast::{Formula, Query};
use serde::Serialize;

/// Triviality of a (possibly simplified) formula.
///
/// Only meaningful when simplification ran; an unsimplified query is
/// reported as complex even if it happens to be a constant.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Triviality {
    CstTrue,
    CstFalse,
    Complex,
}

/// Result of classifying one query.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Classification {
    pub polarity: Polarity,
    pub size: usize,
    pub triviality: Triviality,
}

/// Query classifier - stateless, one query at a time.
pub struct QueryClassifier {
    config: ClassifierConfig,
}

impl QueryClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        QueryClassifier { config }
    }

    /// Classify a query, optionally simplifying it first.
    ///
    /// Deterministic over the polarity flag and, without simplification,
    /// over the formula: repeated calls on the same query agree.
    pub fn classify(&self, query: &Query, category: Category) -> Result<Classification> {
        let polarity = if query.is_ef { Polarity::Ef } else { Polarity::Ag };

        if !self.config.enable_simplification {
            return Ok(Classification {
                polarity,
                size: query.formula.size(),
                triviality: Triviality::Complex,
            });
        }

        let simplified = simplify_with_deadline(query.clone(), category, &self.config)?;
        debug_assert_eq!(simplified.is_ef, query.is_ef);

        let triviality = match simplified.formula {
            Formula::Constant(true) => Triviality::CstTrue,
            Formula::Constant(false) => Triviality::CstFalse,
            _ => Triviality::Complex,
        };
        Ok(Classification {
            polarity,
            size: simplified.formula.size(),
            triviality,
        })
    }
}
