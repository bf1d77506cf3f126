//! # Dimension Risk Analyzer
//!
//! Applies the [`DIMENSION_RULES`] table to a region's
//! [`CulturalProfile`] and a text. Each dimension is checked independently
//! and emits at most one finding; optional dimensions (LTO, IVR) that the
//! profile lacks are skipped. Findings are emitted in canonical dimension
//! order (PDI, IDV, MAS, UAI, LTO, IVR).

use std::borrow::Cow;

use serde::Serialize;

use lens_core::{CulturalProfile, Dimension, DimensionScore, RiskLevel};

use crate::matching::PhraseSet;
use crate::rules::{builtin_phrase_sets, compile_phrase_sets, DimensionRule, DIMENSION_RULES};

/// A cultural-dimension risk found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionRiskFinding {
    /// The dimension that fired.
    pub dimension: Dimension,
    /// Human-readable dimension name.
    pub name: String,
    /// The profile's score for the dimension.
    pub score: DimensionScore,
    /// Severity.
    pub risk_level: RiskLevel,
    /// What is wrong.
    pub issue: String,
    /// How to fix it.
    pub recommendation: String,
    /// The trigger phrases found in the text.
    pub matched_phrases: Vec<String>,
}

/// Applies a dimension rule table.
#[derive(Debug, Clone)]
pub struct DimensionAnalyzer<'r> {
    rules: &'r [DimensionRule],
    phrase_sets: Cow<'r, [Option<PhraseSet>]>,
}

impl DimensionAnalyzer<'static> {
    /// An analyzer over the built-in [`DIMENSION_RULES`]. Their phrase sets
    /// are compiled once per process.
    pub fn new() -> Self {
        Self {
            rules: DIMENSION_RULES,
            phrase_sets: Cow::Borrowed(builtin_phrase_sets()),
        }
    }
}

impl Default for DimensionAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> DimensionAnalyzer<'r> {
    /// An analyzer over a custom rule table, compiling its phrases.
    pub fn with_rules(rules: &'r [DimensionRule]) -> Self {
        Self {
            rules,
            phrase_sets: Cow::Owned(compile_phrase_sets(rules)),
        }
    }

    /// Dimension findings for `text` addressed to `target_region`, whose
    /// cultural profile is `profile`.
    pub fn assess(
        &self,
        text: &str,
        target_region: &str,
        profile: &CulturalProfile,
    ) -> Vec<DimensionRiskFinding> {
        let mut findings = Vec::new();

        for &dimension in Dimension::all() {
            let Some(score) = profile.score(dimension) else {
                tracing::trace!(
                    region = target_region,
                    dimension = dimension.code(),
                    "dimension absent from profile, skipped"
                );
                continue;
            };

            let fired = self
                .rules
                .iter()
                .zip(self.phrase_sets.iter())
                .filter(|(rule, _)| rule.dimension == dimension && rule.band.contains(score))
                .find_map(|(rule, phrases)| {
                    let matched: Vec<String> = phrases
                        .as_ref()?
                        .matches(text)
                        .map(str::to_string)
                        .collect();
                    (!matched.is_empty()).then_some((rule, matched))
                });

            if let Some((rule, matched_phrases)) = fired {
                findings.push(DimensionRiskFinding {
                    dimension,
                    name: dimension.name().to_string(),
                    score,
                    risk_level: rule.risk_level,
                    issue: rule.issue.to_string(),
                    recommendation: rule.recommendation.to_string(),
                    matched_phrases,
                });
            }
        }

        tracing::debug!(
            region = target_region,
            findings = findings.len(),
            "dimension assessment complete"
        );
        findings
    }
}
