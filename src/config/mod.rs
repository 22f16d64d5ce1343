//! Configuration and shared types
//!
//! Closed enums for the verdict/polarity/category vocabularies, the
//! classifier configuration, and the crate error type.

pub mod types;
