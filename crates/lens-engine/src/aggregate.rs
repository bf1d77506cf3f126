//! # Risk Aggregator
//!
//! Folds dimension and sensitivity findings into one verdict:
//!
//! ```text
//! hofstede_score    = max(level score over dimension findings)     (0 if none)
//! sensitivity_score = max(level score over sensitivity findings)   (0 if none)
//! final_score       = hofstede_score * 0.30 + sensitivity_score * 0.70
//! ```
//!
//! with HIGH = 85, MEDIUM = 50, LOW = 20, and the verdict tiered at
//! `>= 70` HIGH, `>= 40` MEDIUM, otherwise LOW. Weights and tier bounds come
//! from an [`AggregationPolicy`]; its default is exactly the constants above.
//!
//! Scores are rounded to two decimals so that, for example, a lone HIGH
//! sensitivity finding scores exactly `59.5`.

use serde::{Deserialize, Serialize};

use lens_core::RiskLevel;

use crate::dimension::DimensionRiskFinding;
use crate::error::EngineError;
use crate::sensitivity::SensitivityRiskFinding;

/// Weights and tier thresholds used by [`RiskAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    /// Weight of the Hofstede sub-score.
    pub hofstede_weight: f64,
    /// Weight of the sensitivity sub-score.
    pub sensitivity_weight: f64,
    /// Lower bound (inclusive) of the HIGH tier.
    pub high_threshold: f64,
    /// Lower bound (inclusive) of the MEDIUM tier.
    pub medium_threshold: f64,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            hofstede_weight: 0.30,
            sensitivity_weight: 0.70,
            high_threshold: 70.0,
            medium_threshold: 40.0,
        }
    }
}

impl AggregationPolicy {
    /// Check weights are finite and non-negative, and thresholds are ordered
    /// within `0..=100`.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("hofstede_weight", self.hofstede_weight),
            ("sensitivity_weight", self.sensitivity_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidWeight { name, value });
            }
        }
        for (name, value) in [
            ("high_threshold", self.high_threshold),
            ("medium_threshold", self.medium_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(EngineError::InvalidThreshold { name, value });
            }
        }
        if self.medium_threshold > self.high_threshold {
            return Err(EngineError::InvertedThresholds {
                medium: self.medium_threshold,
                high: self.high_threshold,
            });
        }
        Ok(())
    }

    /// The tier a final score falls in.
    pub fn tier(&self, final_score: f64) -> RiskLevel {
        if final_score >= self.high_threshold {
            RiskLevel::High
        } else if final_score >= self.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Which analysis produced a triggered lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LensKind {
    /// A cultural-dimension finding.
    Hofstede,
    /// A regional sensitivity finding.
    Sensitivity,
}

/// One finding as it appears in the final verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggeredLens {
    /// Producing analysis.
    #[serde(rename = "type")]
    pub kind: LensKind,
    /// Dimension name or framework name.
    pub name: String,
    /// Severity of the finding.
    pub risk_level: RiskLevel,
}

/// The final verdict for one text and region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalRiskAssessment {
    /// Tier of `final_score`.
    pub risk_level: RiskLevel,
    /// Weighted score in `[0, 100]` for weights summing to one.
    pub final_score: f64,
    /// Highest dimension finding score.
    pub hofstede_score: f64,
    /// Highest sensitivity finding score.
    pub sensitivity_score: f64,
    /// `hofstede_score * hofstede_weight`.
    pub weighted_hofstede_score: f64,
    /// `sensitivity_score * sensitivity_weight`.
    pub weighted_sensitivity_score: f64,
    /// Dimension lenses first, then sensitivity lenses.
    pub triggered_lenses: Vec<TriggeredLens>,
    /// `triggered_lenses.len()`.
    pub total_risks_identified: usize,
}

/// Aggregates findings under a policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAggregator {
    policy: AggregationPolicy,
}

impl RiskAggregator {
    /// An aggregator with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// An aggregator with a validated custom policy.
    pub fn with_policy(policy: AggregationPolicy) -> Result<Self, EngineError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The policy in force.
    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    /// Combine findings into a verdict. Total: any inputs, including none,
    /// yield an assessment.
    pub fn aggregate(
        &self,
        dimension_findings: &[DimensionRiskFinding],
        sensitivity_findings: &[SensitivityRiskFinding],
    ) -> FinalRiskAssessment {
        let hofstede_score = max_score(dimension_findings.iter().map(|f| f.risk_level));
        let sensitivity_score = max_score(sensitivity_findings.iter().map(|f| f.risk_level));

        let weighted_hofstede_score = round2(hofstede_score * self.policy.hofstede_weight);
        let weighted_sensitivity_score = round2(sensitivity_score * self.policy.sensitivity_weight);
        let final_score = round2(weighted_hofstede_score + weighted_sensitivity_score);

        let triggered_lenses: Vec<TriggeredLens> = dimension_findings
            .iter()
            .map(|f| TriggeredLens {
                kind: LensKind::Hofstede,
                name: f.name.clone(),
                risk_level: f.risk_level,
            })
            .chain(sensitivity_findings.iter().map(|f| TriggeredLens {
                kind: LensKind::Sensitivity,
                name: f.framework_name.clone(),
                risk_level: f.risk_level,
            }))
            .collect();

        FinalRiskAssessment {
            risk_level: self.policy.tier(final_score),
            final_score,
            hofstede_score,
            sensitivity_score,
            weighted_hofstede_score,
            weighted_sensitivity_score,
            total_risks_identified: triggered_lenses.len(),
            triggered_lenses,
        }
    }
}

fn max_score(levels: impl Iterator<Item = RiskLevel>) -> f64 {
    levels.max().map_or(0.0, RiskLevel::score)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
