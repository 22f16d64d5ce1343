//! Verdict matrix decoding
//!
//! Turns fixed-width benchmark result records into per-slot report entries.

pub mod decoder;

pub use decoder::{decode_stream, OutputFormat, VerdictEntry, VerdictRecord};
