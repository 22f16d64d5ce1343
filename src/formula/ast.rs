/// Reachability formula representation
///
/// The grammar is the fragment of the competition property language the
/// report pipeline needs: boolean structure over fireability atoms and
/// integer comparisons on token counts. Values are immutable once built.
use serde::{Deserialize, Serialize};

/// Integer-valued expression over net markings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Expr {
    /// Literal integer constant
    Constant(i64),
    /// Sum of tokens over the named places
    TokensCount(Vec<String>),
    /// Sum of sub-expressions
    Sum(Vec<Expr>),
}

impl Expr {
    /// Structural node count of the expression.
    pub fn size(&self) -> usize {
        match self {
            Expr::Constant(_) | Expr::TokensCount(_) => 1,
            Expr::Sum(args) => 1 + args.iter().map(Expr::size).sum::<usize>(),
        }
    }
}

/// Boolean formula over fireability and cardinality atoms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Formula {
    /// Boolean constant, the result of a fully simplified query
    Constant(bool),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    /// True iff at least one of the named transitions is enabled
    IsFireable(Vec<String>),
    /// Integer comparison, left <= right
    LessThanEq(Expr, Expr),
}

impl Formula {
    /// Structural node count, the size metric reported per query.
    ///
    /// Pure and stable: two calls on the same formula agree.
    pub fn size(&self) -> usize {
        match self {
            Formula::Constant(_) | Formula::IsFireable(_) => 1,
            Formula::Not(f) => 1 + f.size(),
            Formula::And(args) | Formula::Or(args) => {
                1 + args.iter().map(Formula::size).sum::<usize>()
            }
            Formula::LessThanEq(lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }

    /// True iff the formula has been reduced to a boolean constant.
    pub fn is_trivial(&self) -> bool {
        matches!(self, Formula::Constant(_))
    }
}

/// One benchmark query: a formula plus its derived polarity flag.
///
/// `is_ef` is true for existential-reachability queries (EF phi) and false
/// for universal-invariant queries (AG phi). The flag is fixed at decode
/// time and survives simplification unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    pub id: String,
    pub formula: Formula,
    pub is_ef: bool,
}
