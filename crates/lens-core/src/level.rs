//! # Sensitivity and Risk Levels
//!
//! The two closed severity vocabularies of the engine, plus the recommended
//! action attached to a sensitivity finding.
//!
//! - [`SensitivityLevel`] rates how sensitive a region is to a framework. It
//!   is the value type of the region × framework matrix.
//! - [`RiskLevel`] is the severity of a single finding and of the final
//!   verdict.
//!
//! Wire format is `SCREAMING_SNAKE_CASE` (`"VERY_HIGH"`, `"FLAG_FOR_REVIEW"`),
//! the same spelling reference data files use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LensError;

// ---------------------------------------------------------------------------
// SensitivityLevel
// ---------------------------------------------------------------------------

/// How sensitive a region is to the topic covered by a framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitivityLevel {
    /// Content touching this topic is likely to be blocked or cause harm.
    VeryHigh,
    /// Content touching this topic needs human review.
    High,
    /// Moderate sensitivity. Also the default for unrated pairs.
    Medium,
    /// Minor sensitivity.
    Low,
    /// The region is indifferent to the topic.
    Neutral,
}

impl SensitivityLevel {
    /// Returns all levels, most sensitive first.
    pub fn all() -> &'static [SensitivityLevel] {
        &[
            Self::VeryHigh,
            Self::High,
            Self::Medium,
            Self::Low,
            Self::Neutral,
        ]
    }

    /// The wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHigh => "VERY_HIGH",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl Default for SensitivityLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensitivityLevel {
    type Err = LensError;

    /// Parse a level from reference data.
    ///
    /// Case-insensitive; spaces and hyphens are accepted in place of
    /// underscores (`"very high"`, `"Very-High"` and `"VERY_HIGH"` are the
    /// same level).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "VERY_HIGH" => Ok(Self::VeryHigh),
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            "NEUTRAL" => Ok(Self::Neutral),
            _ => Err(LensError::UnknownVariant {
                kind: "sensitivity level",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Severity of a finding or of an overall assessment.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Informational.
    Low,
    /// Revision suggested.
    Medium,
    /// Review or block.
    High,
}

impl RiskLevel {
    /// Returns all levels in ascending severity.
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// The numeric value used when aggregating findings.
    pub fn score(self) -> f64 {
        match self {
            Self::High => 85.0,
            Self::Medium => 50.0,
            Self::Low => 20.0,
        }
    }

    /// The wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(LensError::UnknownVariant {
                kind: "risk level",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SensitivityAction
// ---------------------------------------------------------------------------

/// The action recommended for content that triggered a sensitivity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitivityAction {
    /// Do not publish without substantial rework.
    BlockOrMajorRevision,
    /// Route to a human reviewer.
    FlagForReview,
    /// Suggest a revision to the author.
    SuggestRevision,
    /// Surface a minor, optional suggestion.
    MinorSuggestion,
    /// Nothing to do.
    NoAction,
}

impl SensitivityAction {
    /// The wire identifier for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlockOrMajorRevision => "BLOCK_OR_MAJOR_REVISION",
            Self::FlagForReview => "FLAG_FOR_REVIEW",
            Self::SuggestRevision => "SUGGEST_REVISION",
            Self::MinorSuggestion => "MINOR_SUGGESTION",
            Self::NoAction => "NO_ACTION",
        }
    }
}

impl fmt::Display for SensitivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_variant(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
