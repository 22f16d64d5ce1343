//! Query classification and time-bounded simplification
//!
//! Classification is a pure function over the query; the bounded simplifier
//! wraps the formula simplification primitives in a wall-clock deadline.

pub mod bounded;
pub mod classifier;

pub use bounded::{run_with_deadline, simplify_with_deadline};
pub use classifier::{Classification, QueryClassifier, Triviality};
