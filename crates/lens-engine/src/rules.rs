//! # Dimension Rule Table
//!
//! The hand-authored heuristics applied by the
//! [`DimensionAnalyzer`](crate::dimension::DimensionAnalyzer), kept as data.
//! A rule fires when the profile's score for its dimension lies inside its
//! threshold band AND at least one of its phrases occurs in the text.
//!
//! | Dimension | Band | Phrases | Risk |
//! |-----------|------|---------|------|
//! | PDI | ≥ 70 | informal address | HIGH |
//! | PDI | ≤ 35 | hierarchical authority | MEDIUM |
//! | IDV | ≤ 40 | individual achievement | HIGH |
//! | IDV | ≥ 80 | collective duty | MEDIUM |
//! | MAS | ≤ 20 | competition / dominance | HIGH |
//! | UAI | ≥ 80 | ambiguity | HIGH |
//! | UAI | ≤ 30 | rigid / mandatory | MEDIUM |
//! | LTO | ≥ 70 | short-term / instant | MEDIUM |
//! | LTO | ≤ 30 | multi-decade | LOW |
//! | IVR | ≤ 30 | indulgence | MEDIUM |
//!
//! MAS ≥ 80 has no rule: masculine cultures tolerate a competitive register.
//! The two bands of any one dimension never overlap, so at most one rule per
//! dimension can fire.

use std::sync::OnceLock;

use lens_core::{Dimension, DimensionScore, RiskLevel};

use crate::matching::PhraseSet;

/// Inclusive threshold band on a dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdBand {
    /// `score >= n`.
    AtLeast(u8),
    /// `score <= n`.
    AtMost(u8),
}

impl ThresholdBand {
    /// Whether `score` lies in the band.
    pub fn contains(self, score: DimensionScore) -> bool {
        match self {
            Self::AtLeast(n) => score.value() >= n,
            Self::AtMost(n) => score.value() <= n,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionRule {
    /// Dimension the rule reads.
    pub dimension: Dimension,
    /// Band the score must fall in.
    pub band: ThresholdBand,
    /// Severity of the resulting finding.
    pub risk_level: RiskLevel,
    /// Lowercase trigger phrases, matched case-insensitively on word
    /// boundaries.
    pub phrases: &'static [&'static str],
    /// Issue description for the finding.
    pub issue: &'static str,
    /// Recommendation for the finding.
    pub recommendation: &'static str,
}

/// One compiled [`PhraseSet`] per rule, index-aligned with `rules`. A rule
/// whose phrases fail to compile gets `None` and never fires.
pub fn compile_phrase_sets(rules: &[DimensionRule]) -> Vec<Option<PhraseSet>> {
    rules
        .iter()
        .map(|rule| match PhraseSet::new(rule.phrases) {
            Ok(set) => Some(set),
            Err(e) => {
                tracing::warn!(
                    dimension = rule.dimension.code(),
                    error = %e,
                    "rule phrases failed to compile, rule disabled"
                );
                None
            }
        })
        .collect()
}

/// Compiled phrase sets for [`DIMENSION_RULES`], built on first use.
pub fn builtin_phrase_sets() -> &'static [Option<PhraseSet>] {
    static SETS: OnceLock<Vec<Option<PhraseSet>>> = OnceLock::new();
    SETS.get_or_init(|| compile_phrase_sets(DIMENSION_RULES))
}

const INFORMAL_ADDRESS: &[&str] = &[
    "hey",
    "hi there",
    "buddy",
    "dude",
    "guys",
    "mate",
    "folks",
    "yo",
    "what's up",
    "wanna",
    "gonna",
    "no worries",
    "just call me",
];

const HIERARCHICAL_AUTHORITY: &[&str] = &[
    "your excellency",
    "esteemed",
    "honorable",
    "by order of",
    "superiors",
    "chain of command",
    "must obey",
    "defer to",
    "as instructed by management",
    "do as you are told",
];

const INDIVIDUAL_ACHIEVEMENT: &[&str] = &[
    "self-made",
    "be your own boss",
    "stand out from the crowd",
    "personal success",
    "individual achievement",
    "on your own",
    "me first",
    "look out for number one",
    "break away from the pack",
    "i did it my way",
];

const COLLECTIVE_DUTY: &[&str] = &[
    "duty to the group",
    "for the family",
    "sacrifice for",
    "collective good",
    "your community expects",
    "bring honor",
    "obligation to your",
    "conform",
    "for the sake of the group",
];

const COMPETITIVE_DOMINANCE: &[&str] = &[
    "crush the competition",
    "dominate",
    "destroy the competition",
    "winner takes all",
    "be the best",
    "beat everyone",
    "killer",
    "aggressive",
    "number one",
    "outperform everyone",
];

const AMBIGUITY: &[&str] = &[
    "maybe",
    "might",
    "possibly",
    "we'll see",
    "no guarantee",
    "experimental",
    "uncertain",
    "figure it out later",
    "roughly",
    "approximately",
    "tbd",
];

const RIGID_MANDATORY: &[&str] = &[
    "must",
    "mandatory",
    "strictly",
    "no exceptions",
    "without exception",
    "non-negotiable",
    "required to",
    "always follow",
    "forbidden",
];

const SHORT_TERM: &[&str] = &[
    "instant",
    "overnight",
    "get rich quick",
    "right now",
    "immediately",
    "quick win",
    "today only",
    "limited time",
];

const MULTI_DECADE: &[&str] = &[
    "decades",
    "for generations",
    "next century",
    "20-year",
    "30-year",
    "lifetime plan",
    "long-term legacy",
];

const INDULGENCE: &[&str] = &[
    "indulge",
    "treat yourself",
    "party",
    "pleasure",
    "you deserve it",
    "live it up",
    "yolo",
    "splurge",
    "guilty pleasure",
];

/// The built-in rule table.
pub const DIMENSION_RULES: &[DimensionRule] = &[
    DimensionRule {
        dimension: Dimension::PowerDistance,
        band: ThresholdBand::AtLeast(70),
        risk_level: RiskLevel::High,
        phrases: INFORMAL_ADDRESS,
        issue: "Informal language inappropriate for a high power-distance culture",
        recommendation: "Use formal address, titles and honorifics; avoid casual greetings",
    },
    DimensionRule {
        dimension: Dimension::PowerDistance,
        band: ThresholdBand::AtMost(35),
        risk_level: RiskLevel::Medium,
        phrases: HIERARCHICAL_AUTHORITY,
        issue: "Hierarchical, authority-driven language may alienate a low power-distance audience",
        recommendation: "Use egalitarian wording; invite participation instead of invoking rank",
    },
    DimensionRule {
        dimension: Dimension::Individualism,
        band: ThresholdBand::AtMost(40),
        risk_level: RiskLevel::High,
        phrases: INDIVIDUAL_ACHIEVEMENT,
        issue: "Individual-achievement framing conflicts with collectivist values",
        recommendation: "Frame benefits around family, team and community outcomes",
    },
    DimensionRule {
        dimension: Dimension::Individualism,
        band: ThresholdBand::AtLeast(80),
        risk_level: RiskLevel::Medium,
        phrases: COLLECTIVE_DUTY,
        issue: "Collective-duty framing may read as coercive in an individualist culture",
        recommendation: "Emphasize personal choice, autonomy and individual benefit",
    },
    DimensionRule {
        dimension: Dimension::Masculinity,
        band: ThresholdBand::AtMost(20),
        risk_level: RiskLevel::High,
        phrases: COMPETITIVE_DOMINANCE,
        issue: "Competitive, dominance-oriented tone clashes with a consensus-oriented culture",
        recommendation: "Stress cooperation, quality of life and shared success",
    },
    DimensionRule {
        dimension: Dimension::UncertaintyAvoidance,
        band: ThresholdBand::AtLeast(80),
        risk_level: RiskLevel::High,
        phrases: AMBIGUITY,
        issue: "Vague or uncertain claims undermine trust in a high uncertainty-avoidance culture",
        recommendation: "State concrete facts, guarantees, specifications and clear next steps",
    },
    DimensionRule {
        dimension: Dimension::UncertaintyAvoidance,
        band: ThresholdBand::AtMost(30),
        risk_level: RiskLevel::Medium,
        phrases: RIGID_MANDATORY,
        issue: "Rigid, rule-bound language may feel constraining to a low uncertainty-avoidance audience",
        recommendation: "Offer flexibility and options rather than mandates",
    },
    DimensionRule {
        dimension: Dimension::LongTermOrientation,
        band: ThresholdBand::AtLeast(70),
        risk_level: RiskLevel::Medium,
        phrases: SHORT_TERM,
        issue: "Short-term, instant-gratification messaging conflicts with long-term orientation",
        recommendation: "Highlight durability, persistence and long-term value",
    },
    DimensionRule {
        dimension: Dimension::LongTermOrientation,
        band: ThresholdBand::AtMost(30),
        risk_level: RiskLevel::Low,
        phrases: MULTI_DECADE,
        issue: "Multi-decade horizons may not resonate with a short-term oriented audience",
        recommendation: "Lead with near-term, tangible results",
    },
    DimensionRule {
        dimension: Dimension::Indulgence,
        band: ThresholdBand::AtMost(30),
        risk_level: RiskLevel::Medium,
        phrases: INDULGENCE,
        issue: "Indulgence-themed messaging may conflict with a restrained culture",
        recommendation: "Emphasize practicality, moderation and responsibility",
    },
];
