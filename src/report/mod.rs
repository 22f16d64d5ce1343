//! Report drivers
//!
//! Sequential file iteration wiring the decoders and the classifier to the
//! two report formats. No state is shared across records or directories.

pub mod formulas;
pub mod verdicts;

pub use formulas::FormulaEntry;
