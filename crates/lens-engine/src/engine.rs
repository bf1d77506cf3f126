//! # Risk Engine
//!
//! End-to-end analysis of one text for one target region against a shared,
//! immutable [`ReferenceStore`]:
//!
//! 1. detect frameworks by keyword,
//! 2. assess each detected framework for the region,
//! 3. run the dimension rules if the region has a cultural profile,
//! 4. aggregate into a [`FinalRiskAssessment`].
//!
//! The engine holds an `Arc` of the store, so clones are cheap and any
//! number of threads may analyze concurrently.

use std::sync::Arc;

use serde::Serialize;

use lens_core::{BlocName, CulturalProfile};
use lens_reference::ReferenceStore;

use crate::aggregate::{AggregationPolicy, FinalRiskAssessment, RiskAggregator};
use crate::detector::{FrameworkMatch, KeywordDetector};
use crate::dimension::{DimensionAnalyzer, DimensionRiskFinding};
use crate::error::EngineError;
use crate::sensitivity::{SensitivityAssessor, SensitivityRiskFinding};

/// Full result of [`RiskEngine::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalAssessment {
    /// Target region, trimmed.
    pub region: String,
    /// Cultural blocs the region belongs to, sorted.
    pub blocs: Vec<BlocName>,
    /// Whether the region has a cultural profile. Without one no dimension
    /// findings are produced.
    pub profile_available: bool,
    /// Dimension findings in canonical dimension order.
    pub dimension_findings: Vec<DimensionRiskFinding>,
    /// One finding per detected framework, in framework load order.
    pub sensitivity_findings: Vec<SensitivityRiskFinding>,
    /// The aggregated verdict.
    pub assessment: FinalRiskAssessment,
}

/// The scoring engine.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    store: Arc<ReferenceStore>,
    aggregator: RiskAggregator,
}

impl RiskEngine {
    /// An engine over `store` with the default aggregation policy.
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self {
            store,
            aggregator: RiskAggregator::new(),
        }
    }

    /// An engine over `store` with a custom, validated policy.
    pub fn with_policy(
        store: Arc<ReferenceStore>,
        policy: AggregationPolicy,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            store,
            aggregator: RiskAggregator::with_policy(policy)?,
        })
    }

    /// The shared reference store.
    pub fn store(&self) -> &Arc<ReferenceStore> {
        &self.store
    }

    /// The aggregation policy in force.
    pub fn policy(&self) -> &AggregationPolicy {
        self.aggregator.policy()
    }

    /// Frameworks whose keywords occur in `text`.
    pub fn detect(&self, text: &str) -> Vec<FrameworkMatch> {
        KeywordDetector::new(&self.store).detect(text)
    }

    /// Dimension findings for `text` in `target_region`. Empty when the
    /// region has no cultural profile.
    pub fn assess_dimensions(&self, text: &str, target_region: &str) -> Vec<DimensionRiskFinding> {
        let region = target_region.trim();
        self.dimensions_for(text, region, self.store.get_profile(region))
    }

    fn dimensions_for(
        &self,
        text: &str,
        region: &str,
        profile: Option<&CulturalProfile>,
    ) -> Vec<DimensionRiskFinding> {
        match profile {
            Some(profile) => DimensionAnalyzer::new().assess(text, region, profile),
            None => {
                tracing::debug!(region, "no cultural profile, dimension analysis skipped");
                Vec::new()
            }
        }
    }

    /// Sensitivity finding for one detected framework in `target_region`.
    pub fn assess_sensitivity(
        &self,
        detected: &FrameworkMatch,
        target_region: &str,
    ) -> SensitivityRiskFinding {
        SensitivityAssessor::new(&self.store).assess(
            &detected.framework_id,
            target_region.trim(),
            &detected.matched_keywords,
        )
    }

    /// Aggregate findings under the engine's policy.
    pub fn aggregate(
        &self,
        dimension_findings: &[DimensionRiskFinding],
        sensitivity_findings: &[SensitivityRiskFinding],
    ) -> FinalRiskAssessment {
        self.aggregator
            .aggregate(dimension_findings, sensitivity_findings)
    }

    /// Analyze `text` for `target_region`. Surrounding whitespace in the
    /// region name is ignored.
    pub fn analyze(&self, text: &str, target_region: &str) -> RegionalAssessment {
        let region = target_region.trim();
        let profile = self.store.get_profile(region);

        let sensitivity_findings: Vec<SensitivityRiskFinding> = self
            .detect(text)
            .iter()
            .map(|detected| self.assess_sensitivity(detected, region))
            .collect();
        let dimension_findings = self.dimensions_for(text, region, profile);
        let assessment = self.aggregate(&dimension_findings, &sensitivity_findings);

        tracing::debug!(
            region,
            dimension_findings = dimension_findings.len(),
            sensitivity_findings = sensitivity_findings.len(),
            final_score = assessment.final_score,
            risk_level = %assessment.risk_level,
            "analysis complete"
        );

        RegionalAssessment {
            region: region.to_string(),
            blocs: self.store.get_blocs_for(region).iter().cloned().collect(),
            profile_available: profile.is_some(),
            dimension_findings,
            sensitivity_findings,
            assessment,
        }
    }
}
