//! # Reference Sources
//!
//! The [`ReferenceSource`] trait is the seam between the store and whatever
//! owns the reference datasets. A source hands back raw, unvalidated records
//! for each of the four tables; validation happens in
//! [`ReferenceStore`](crate::store::ReferenceStore) so that every source gets
//! the same entry-level rejection rules.
//!
//! Each table is fetched independently. A source returning `Err` for one
//! table does not stop the others from loading.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    /// Country → Hofstede profile.
    Profiles,
    /// Bloc → member countries.
    Blocs,
    /// Framework id → name and keywords.
    Frameworks,
    /// (region, framework) → sensitivity level.
    Sensitivity,
}

impl ReferenceTable {
    /// Returns all tables in load order.
    pub fn all() -> &'static [ReferenceTable] {
        &[
            Self::Profiles,
            Self::Blocs,
            Self::Frameworks,
            Self::Sensitivity,
        ]
    }

    /// The snake_case identifier for this table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Blocs => "blocs",
            Self::Frameworks => "frameworks",
            Self::Sensitivity => "sensitivity",
        }
    }
}

impl fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// One row of the profile table, before range validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Country or market name.
    pub country: String,
    /// Power Distance.
    pub pdi: i64,
    /// Individualism.
    pub idv: i64,
    /// Masculinity.
    pub mas: i64,
    /// Uncertainty Avoidance.
    pub uai: i64,
    /// Long-Term Orientation, absent when unpublished.
    #[serde(default)]
    pub lto: Option<i64>,
    /// Indulgence, absent when unpublished.
    #[serde(default)]
    pub ivr: Option<i64>,
}

/// One cultural bloc and its member countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocRecord {
    /// Bloc name.
    pub name: String,
    /// Member country names.
    #[serde(default)]
    pub countries: Vec<String>,
}

/// One sensitivity framework definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkRecord {
    /// Stable machine identifier.
    pub id: String,
    /// Human-readable name. Falls back to `id` when empty.
    #[serde(default)]
    pub name: String,
    /// Keywords matched case-insensitively against text.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One cell of the region × framework matrix.
///
/// `level` stays a string here so that a single misspelled level rejects
/// only its own cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityRecord {
    /// Region (country or market) name.
    pub region: String,
    /// Framework id.
    pub framework: String,
    /// Sensitivity level, e.g. `"VERY_HIGH"`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce one reference table.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backing file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The backing document could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported reference file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat {
        /// File with the unknown extension.
        path: PathBuf,
    },

    /// The source has no data for this table.
    #[error("{table} table unavailable: {reason}")]
    Unavailable {
        /// Table that is missing.
        table: ReferenceTable,
        /// Why.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// ReferenceSource Trait
// ---------------------------------------------------------------------------

/// Supplies the raw reference tables.
///
/// Implementations only fetch and decode. They must not filter or
/// validate records; the store does that uniformly and reports each
/// rejection as a load warning.
pub trait ReferenceSource: Send + Sync + fmt::Debug {
    /// Country profiles, in source order.
    fn profiles(&self) -> Result<Vec<ProfileRecord>, SourceError>;

    /// Cultural blocs.
    fn blocs(&self) -> Result<Vec<BlocRecord>, SourceError>;

    /// Sensitivity frameworks, in source order. Detection output follows
    /// this order.
    fn frameworks(&self) -> Result<Vec<FrameworkRecord>, SourceError>;

    /// Region × framework sensitivity cells.
    fn sensitivity(&self) -> Result<Vec<SensitivityRecord>, SourceError>;
}

impl<S: ReferenceSource + ?Sized> ReferenceSource for Box<S> {
    fn profiles(&self) -> Result<Vec<ProfileRecord>, SourceError> {
        (**self).profiles()
    }

    fn blocs(&self) -> Result<Vec<BlocRecord>, SourceError> {
        (**self).blocs()
    }

    fn frameworks(&self) -> Result<Vec<FrameworkRecord>, SourceError> {
        (**self).frameworks()
    }

    fn sensitivity(&self) -> Result<Vec<SensitivityRecord>, SourceError> {
        (**self).sensitivity()
    }
}
