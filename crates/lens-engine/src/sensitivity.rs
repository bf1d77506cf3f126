//! # Regional Sensitivity Assessor
//!
//! Turns a detected framework into a risk finding for a target region by
//! looking up the region's rated sensitivity and mapping it through a fixed
//! response table:
//!
//! | Level | Risk | Action | Confidence |
//! |-------|------|--------|------------|
//! | VERY_HIGH | HIGH | BLOCK_OR_MAJOR_REVISION | 0.95 |
//! | HIGH | HIGH | FLAG_FOR_REVIEW | 0.85 |
//! | MEDIUM | MEDIUM | SUGGEST_REVISION | 0.70 |
//! | LOW | LOW | MINOR_SUGGESTION | 0.60 |
//! | NEUTRAL | LOW | NO_ACTION | 0.50 |
//!
//! Unrated (region, framework) pairs are assessed as MEDIUM.

use serde::Serialize;

use lens_core::{FrameworkId, RiskLevel, SensitivityAction, SensitivityLevel};
use lens_reference::ReferenceStore;

/// The fixed response to a sensitivity level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityResponse {
    /// Severity of the finding.
    pub risk_level: RiskLevel,
    /// Recommended action.
    pub action: SensitivityAction,
    /// Confidence in the finding, in `[0, 1]`.
    pub confidence: f64,
}

impl SensitivityResponse {
    /// The response table row for `level`.
    pub fn for_level(level: SensitivityLevel) -> Self {
        let (risk_level, action, confidence) = match level {
            SensitivityLevel::VeryHigh => (
                RiskLevel::High,
                SensitivityAction::BlockOrMajorRevision,
                0.95,
            ),
            SensitivityLevel::High => (RiskLevel::High, SensitivityAction::FlagForReview, 0.85),
            SensitivityLevel::Medium => (RiskLevel::Medium, SensitivityAction::SuggestRevision, 0.70),
            SensitivityLevel::Low => (RiskLevel::Low, SensitivityAction::MinorSuggestion, 0.60),
            SensitivityLevel::Neutral => (RiskLevel::Low, SensitivityAction::NoAction, 0.50),
        };
        Self {
            risk_level,
            action,
            confidence,
        }
    }
}

/// A framework finding assessed for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityRiskFinding {
    /// Framework id.
    pub framework_id: FrameworkId,
    /// Framework name; the id when the framework is not loaded.
    pub framework_name: String,
    /// Region the content is aimed at.
    pub target_region: String,
    /// The region's sensitivity to the framework.
    pub sensitivity_level: SensitivityLevel,
    /// Whether `sensitivity_level` came from the matrix (`false` when it is
    /// the MEDIUM default).
    pub rated: bool,
    /// Keywords that triggered the framework.
    pub matched_keywords: Vec<String>,
    /// Severity.
    pub risk_level: RiskLevel,
    /// Recommended action.
    pub action: SensitivityAction,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Assesses detected frameworks against the sensitivity matrix.
#[derive(Debug, Clone, Copy)]
pub struct SensitivityAssessor<'a> {
    store: &'a ReferenceStore,
}

impl<'a> SensitivityAssessor<'a> {
    /// An assessor over the store's matrix.
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    /// Assess `framework_id`, triggered by `matched_keywords`, for
    /// `target_region`.
    pub fn assess(
        &self,
        framework_id: &FrameworkId,
        target_region: &str,
        matched_keywords: &[String],
    ) -> SensitivityRiskFinding {
        let rated = self
            .store
            .rated_sensitivity(target_region, framework_id.as_str());
        let sensitivity_level = rated.unwrap_or_default();
        if rated.is_none() {
            tracing::debug!(
                region = target_region,
                framework = %framework_id,
                "no sensitivity rating, assuming MEDIUM"
            );
        }

        let framework_name = self
            .store
            .get_framework(framework_id.as_str())
            .map(|f| f.name().to_string())
            .unwrap_or_else(|| framework_id.as_str().to_string());

        let response = SensitivityResponse::for_level(sensitivity_level);
        SensitivityRiskFinding {
            framework_id: framework_id.clone(),
            framework_name,
            target_region: target_region.to_string(),
            sensitivity_level,
            rated: rated.is_some(),
            matched_keywords: matched_keywords.to_vec(),
            risk_level: response.risk_level,
            action: response.action,
            confidence: response.confidence,
        }
    }
}
