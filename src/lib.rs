//! oraclebox: post-processing reports for formal-verification benchmark runs
//!
//! Turns two kinds of opaque benchmark artifacts into flat, greppable,
//! per-query report lines:
//!
//! - a **verdict matrix** file, one fixed-width record per model with
//!   sixteen single-character verdict codes, decoded into labeled per-slot
//!   lines ([`verdict`]);
//! - per-model **formula files**, whose queries are classified by logical
//!   polarity (EF vs AG) and reported with a structural size metric
//!   ([`classify`], [`formula`]).
//!
//! # Architecture
//!
//! ## Verdict decoding ([`verdict`])
//! - [`verdict::decoder`]: streaming record parsing and per-slot labeling
//!
//! ## Formula collaborator ([`formula`])
//! - [`formula::ast`]: immutable formula values with a structural size
//! - [`formula::decoder`]: competition property XML decoding
//! - [`formula::simplify`]: generic and fireability-specialized rewriting
//!
//! ## Classification ([`classify`])
//! - [`classify::classifier`]: pure polarity/size classification
//! - [`classify::bounded`]: wall-clock-bounded simplification with
//!   abandon-on-timeout semantics
//!
//! ## Report drivers ([`report`])
//! - [`report::verdicts`]: verdict file to report lines
//! - [`report::formulas`]: benchmark root to per-query report lines
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: closed vocabularies, classifier config, errors
//!
//! # Design Principles
//!
//! 1. **Stateless transformation** - nothing persists between invocations
//! 2. **Fail fast by default** - the first bad input halts the whole run;
//!    library APIs return per-record results so a harness can choose
//!    otherwise
//! 3. **Explicit gaps** - unknown verdict codes and simplification failures
//!    are governed by named policies, not silent branches
//! 4. **Time-bounded work** - simplification races a configurable deadline
//!    and the original value wins on timeout

// Verdict matrix decoding
pub mod verdict;

// Formula representation and decoding
pub mod formula;

// Query classification and bounded simplification
pub mod classify;

// Report drivers
pub mod report;

// Configuration and shared types
pub mod config;

// CLI entrypoint wiring shared by the oraclebox/verdicts/formulas binaries.
pub mod cli;

// Re-export commonly used types for convenience
pub use config::types::*;
