/// Core types and structures for the oraclebox report pipelines
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Verdict code for one query slot of a benchmark result record.
///
/// The code alphabet is closed: every character a tool may emit for a slot
/// maps to exactly one of these, and anything else is not a verdict.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    /// No answer was produced for the query
    Unknown,
    /// The query was answered positively
    True,
    /// The query was answered negatively
    False,
    /// Unconfirmed positive answer
    Possible,
    /// Unconfirmed negative answer
    Unlikely,
}

impl Verdict {
    /// Map a single verdict character to its verdict, if it is one.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '?' => Some(Verdict::Unknown),
            'T' => Some(Verdict::True),
            'F' => Some(Verdict::False),
            'P' => Some(Verdict::Possible),
            'U' => Some(Verdict::Unlikely),
            _ => None,
        }
    }

    /// Human-readable label used in report lines.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Unknown => "UNKNOWN",
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::Possible => "POSSIBLE",
            Verdict::Unlikely => "UNLIKELY",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Logical polarity of a reachability query.
///
/// EF queries ask whether a state is reachable (counter-example shaped);
/// AG queries ask whether a property holds on every path (invariant shaped).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Polarity {
    Ef,
    Ag,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Ef => f.write_str("EF"),
            Polarity::Ag => f.write_str("AG"),
        }
    }
}

/// Competition category of a formula file.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    ReachabilityFireability,
    ReachabilityCardinality,
}

impl Category {
    /// Fixed processing order used by the report driver.
    pub const ALL: [Category; 2] = [
        Category::ReachabilityFireability,
        Category::ReachabilityCardinality,
    ];

    /// Competition name, which is also the formula file stem.
    pub fn name(self) -> &'static str {
        match self {
            Category::ReachabilityFireability => "ReachabilityFireability",
            Category::ReachabilityCardinality => "ReachabilityCardinality",
        }
    }

    /// File name of the formula file inside a benchmark directory.
    pub fn file_name(self) -> String {
        format!("{}.xml", self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a verdict character outside the known code alphabet.
///
/// The observed production behavior is to drop the slot silently, so that
/// stays the default. The gap is explicit and configurable rather than an
/// invisible branch in the decoder.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnknownCodePolicy {
    /// Drop the slot without a diagnostic (observed behavior)
    #[default]
    Ignore,
    /// Drop the slot but log a warning
    Warn,
    /// Treat the record as invalid and abort the run
    Fail,
}

/// What to do when a simplification attempt reports an error.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SimplifyErrorPolicy {
    /// Keep the unsimplified formula and log a warning
    #[default]
    Warn,
    /// Keep the unsimplified formula silently
    Ignore,
    /// Abort the run
    Fail,
}

/// Configuration for the query classification pipeline.
///
/// Simplification is an explicit opt-in. It was disabled in production
/// because it can be very time consuming on large nets, so `false` is the
/// default, with the deadline kept configurable for callers that enable it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Run the bounded simplifier before classifying
    pub enable_simplification: bool,
    /// Wall-clock budget for one simplification attempt
    pub deadline: Duration,
    /// Handling of simplification errors
    pub simplify_errors: SimplifyErrorPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            enable_simplification: false,
            deadline: Duration::from_secs(60),
            simplify_errors: SimplifyErrorPolicy::default(),
        }
    }
}

/// Custom error types for oraclebox
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record on line {line_no}: expected 18 fields, found {found}")]
    MalformedRecord { line_no: usize, found: usize },

    #[error("malformed verdict string on line {line_no}: expected 16 codes, found {found}")]
    MalformedVerdictString { line_no: usize, found: usize },

    #[error("unknown verdict code {code:?} in slot {slot}")]
    UnknownVerdictCode { code: char, slot: usize },

    #[error("formula decode error: {0}")]
    Decode(String),

    #[error("simplification error: {0}")]
    Simplify(String),

    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Result type alias for oraclebox operations
pub type Result<T> = std::result::Result<T, ReportError>;
