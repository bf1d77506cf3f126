//! # Hofstede Dimensions and Cultural Profiles
//!
//! The six-dimension cultural model. Four dimensions (PDI, IDV, MAS, UAI) are
//! published for every country; LTO and IVR are missing for some, so a
//! [`CulturalProfile`] carries them as `Option`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LensError;
use crate::identity::RegionId;

/// Number of Hofstede dimensions.
pub const DIMENSION_COUNT: usize = 6;

/// A Hofstede cultural dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Power Distance (PDI).
    PowerDistance,
    /// Individualism (IDV).
    Individualism,
    /// Masculinity (MAS).
    Masculinity,
    /// Uncertainty Avoidance (UAI).
    UncertaintyAvoidance,
    /// Long-Term Orientation (LTO). Optional in profiles.
    LongTermOrientation,
    /// Indulgence (IVR). Optional in profiles.
    Indulgence,
}

impl Dimension {
    /// Returns all six dimensions in canonical order.
    pub fn all() -> &'static [Dimension] {
        &[
            Self::PowerDistance,
            Self::Individualism,
            Self::Masculinity,
            Self::UncertaintyAvoidance,
            Self::LongTermOrientation,
            Self::Indulgence,
        ]
    }

    /// Three-letter code used in reference data (`"PDI"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::PowerDistance => "PDI",
            Self::Individualism => "IDV",
            Self::Masculinity => "MAS",
            Self::UncertaintyAvoidance => "UAI",
            Self::LongTermOrientation => "LTO",
            Self::Indulgence => "IVR",
        }
    }

    /// Human-readable dimension name (`"Power Distance"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::PowerDistance => "Power Distance",
            Self::Individualism => "Individualism",
            Self::Masculinity => "Masculinity",
            Self::UncertaintyAvoidance => "Uncertainty Avoidance",
            Self::LongTermOrientation => "Long-Term Orientation",
            Self::Indulgence => "Indulgence",
        }
    }

    /// Whether every profile is required to carry this dimension.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::LongTermOrientation | Self::Indulgence)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dimension {
    type Err = LensError;

    /// Parse from the three-letter code, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PDI" => Ok(Self::PowerDistance),
            "IDV" => Ok(Self::Individualism),
            "MAS" => Ok(Self::Masculinity),
            "UAI" => Ok(Self::UncertaintyAvoidance),
            "LTO" => Ok(Self::LongTermOrientation),
            "IVR" => Ok(Self::Indulgence),
            _ => Err(LensError::UnknownVariant {
                kind: "dimension",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DimensionScore
// ---------------------------------------------------------------------------

/// A dimension score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DimensionScore(u8);

impl DimensionScore {
    /// Largest valid score.
    pub const MAX: u8 = 100;

    /// Validate a raw score for the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::ScoreOutOfRange`] for values outside `0..=100`.
    pub fn for_dimension(dimension: Dimension, value: i64) -> Result<Self, LensError> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(LensError::ScoreOutOfRange {
                dimension: dimension.code(),
                value,
            })
        }
    }

    /// The score as an integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for DimensionScore {
    type Error = LensError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(LensError::ScoreOutOfRange {
                dimension: "dimension",
                value,
            })
        }
    }
}

impl From<DimensionScore> for u8 {
    fn from(score: DimensionScore) -> Self {
        score.0
    }
}

impl fmt::Display for DimensionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CulturalProfile
// ---------------------------------------------------------------------------

/// The Hofstede profile of one country or market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalProfile {
    /// The country or market this profile describes.
    pub region: RegionId,
    /// Power Distance.
    pub pdi: DimensionScore,
    /// Individualism.
    pub idv: DimensionScore,
    /// Masculinity.
    pub mas: DimensionScore,
    /// Uncertainty Avoidance.
    pub uai: DimensionScore,
    /// Long-Term Orientation, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lto: Option<DimensionScore>,
    /// Indulgence, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ivr: Option<DimensionScore>,
}

impl CulturalProfile {
    /// Build a profile from raw scores, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the first [`LensError::ScoreOutOfRange`] encountered, in
    /// canonical dimension order.
    pub fn from_scores(
        region: RegionId,
        pdi: i64,
        idv: i64,
        mas: i64,
        uai: i64,
        lto: Option<i64>,
        ivr: Option<i64>,
    ) -> Result<Self, LensError> {
        let optional = |dimension, value: Option<i64>| {
            value
                .map(|v| DimensionScore::for_dimension(dimension, v))
                .transpose()
        };
        Ok(Self {
            region,
            pdi: DimensionScore::for_dimension(Dimension::PowerDistance, pdi)?,
            idv: DimensionScore::for_dimension(Dimension::Individualism, idv)?,
            mas: DimensionScore::for_dimension(Dimension::Masculinity, mas)?,
            uai: DimensionScore::for_dimension(Dimension::UncertaintyAvoidance, uai)?,
            lto: optional(Dimension::LongTermOrientation, lto)?,
            ivr: optional(Dimension::Indulgence, ivr)?,
        })
    }

    /// The score for a dimension, `None` when an optional dimension is absent.
    pub fn score(&self, dimension: Dimension) -> Option<DimensionScore> {
        match dimension {
            Dimension::PowerDistance => Some(self.pdi),
            Dimension::Individualism => Some(self.idv),
            Dimension::Masculinity => Some(self.mas),
            Dimension::UncertaintyAvoidance => Some(self.uai),
            Dimension::LongTermOrientation => self.lto,
            Dimension::Indulgence => self.ivr,
        }
    }
}
