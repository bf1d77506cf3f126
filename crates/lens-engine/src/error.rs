//! Engine configuration errors.
//!
//! Analysis itself is total. The only fallible step is accepting a
//! caller-supplied [`AggregationPolicy`](crate::aggregate::AggregationPolicy).

use thiserror::Error;

/// Error raised when configuring the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A weight was negative or not a finite number.
    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidWeight {
        /// Policy field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A tier threshold fell outside `0..=100`.
    #[error("{name} must lie in 0..=100, got {value}")]
    InvalidThreshold {
        /// Policy field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The MEDIUM threshold exceeded the HIGH threshold.
    #[error("medium_threshold {medium} exceeds high_threshold {high}")]
    InvertedThresholds {
        /// MEDIUM tier lower bound.
        medium: f64,
        /// HIGH tier lower bound.
        high: f64,
    },
}
