//! # Error Types: Structured Error Hierarchy
//!
//! Validation errors raised when constructing core types from untrusted
//! input. All errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! Analysis in `lens-engine` never returns these: by the time text is being
//! scored every identifier and score has already been validated at load time.

use thiserror::Error;

/// Top-level error type for core type construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// An identifier was empty or whitespace-only.
    #[error("empty {kind} identifier")]
    EmptyIdentifier {
        /// Which identifier namespace was being constructed.
        kind: &'static str,
    },

    /// A Hofstede dimension score fell outside `0..=100`.
    #[error("{dimension} score {value} is outside 0..=100")]
    ScoreOutOfRange {
        /// Dimension code (e.g. "PDI").
        dimension: &'static str,
        /// The rejected value as supplied.
        value: i64,
    },

    /// A string did not name a known level or dimension.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// The enum being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
