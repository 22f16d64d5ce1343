//! Formula representation, decoding, and simplification
//!
//! The collaborator surface the classifier builds on: an immutable formula
//! AST with a structural size metric, an XML decoder for competition
//! property files, and the two simplification primitives.

pub mod ast;
pub mod decoder;
pub mod simplify;

pub use ast::{Expr, Formula, Query};
pub use decoder::decode_queries;
pub use simplify::{bdd_fireability_simplify, simplify};
