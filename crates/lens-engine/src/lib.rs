//! # lens-engine: Risk Scoring for the Cultural Lens Stack
//!
//! Scores a piece of text for a target region in four stages:
//!
//! - [`detector`]: which sensitivity frameworks the text touches (keyword
//!   presence).
//! - [`sensitivity`]: how the region rates each touched framework, mapped to
//!   a risk level, action and confidence.
//! - [`dimension`]: Hofstede heuristics from the [`rules`] table, applied to
//!   the region's cultural profile.
//! - [`aggregate`]: max per source, weighted, tiered into a final verdict.
//!
//! [`RiskEngine`] runs all four against a shared
//! [`ReferenceStore`](lens_reference::ReferenceStore). Every stage is a pure,
//! synchronous function of its inputs and the frozen store.

pub mod aggregate;
pub mod detector;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod matching;
pub mod rules;
pub mod sensitivity;

// Re-export primary types.
pub use aggregate::{
    AggregationPolicy, FinalRiskAssessment, LensKind, RiskAggregator, TriggeredLens,
};
pub use detector::{FrameworkMatch, KeywordDetector};
pub use dimension::{DimensionAnalyzer, DimensionRiskFinding};
pub use engine::{RegionalAssessment, RiskEngine};
pub use error::EngineError;
pub use rules::{DimensionRule, ThresholdBand, DIMENSION_RULES};
pub use sensitivity::{SensitivityAssessor, SensitivityResponse, SensitivityRiskFinding};
