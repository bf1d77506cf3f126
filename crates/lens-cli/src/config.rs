//! # CLI Configuration
//!
//! `lens.yaml` names the four reference documents and, optionally, the
//! aggregation policy:
//!
//! ```yaml
//! reference:
//!   profiles: data/profiles.yaml
//!   blocs: data/blocs.yaml
//!   frameworks: data/frameworks.yaml
//!   sensitivity: data/sensitivity.yaml
//! scoring:
//!   hofstede_weight: 0.30
//!   sensitivity_weight: 0.70
//! ```
//!
//! Relative reference paths resolve against the directory holding the
//! config file. Omitted `scoring` fields take the engine defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lens_engine::{AggregationPolicy, EngineError, RiskEngine};
use lens_reference::{FileSource, ReferencePaths, ReferenceStore};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "lens.yaml";

/// Errors raised while loading CLI configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`LensConfig`].
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The `scoring` section was rejected.
    #[error("invalid scoring policy: {0}")]
    Policy(#[from] EngineError),
}

/// Parsed `lens.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LensConfig {
    /// Reference document locations.
    pub reference: ReferencePaths,
    /// Aggregation policy.
    #[serde(default)]
    pub scoring: AggregationPolicy,
}

impl LensConfig {
    /// The standard file names inside `dir` with the default policy.
    pub fn for_data_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            reference: ReferencePaths::in_dir(dir),
            scoring: AggregationPolicy::default(),
        }
    }

    /// Read and parse a config file, resolving reference paths against its
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self {
            reference: config.reference.resolved_against(base),
            scoring: config.scoring,
        })
    }

    /// Pick the configuration for a run: an explicit `--config`, else
    /// `default_file` if it exists, else the standard files in `data_dir`.
    pub fn resolve(
        explicit: Option<&Path>,
        default_file: &Path,
        data_dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(config = %path.display(), "loading config");
            return Self::from_file(path);
        }
        if default_file.is_file() {
            tracing::debug!(config = %default_file.display(), "loading default config");
            return Self::from_file(default_file);
        }
        tracing::debug!(data_dir = %data_dir.display(), "no config file, using data directory");
        Ok(Self::for_data_dir(data_dir))
    }

    /// Build an engine over a freshly loaded file-backed store.
    pub fn build_engine(&self) -> Result<RiskEngine, ConfigError> {
        let store = ReferenceStore::new(FileSource::new(self.reference.clone()));
        let report = store.load();
        if report.is_degraded() {
            tracing::warn!(
                tables = ?report.unavailable_tables(),
                "reference data degraded; affected tables are empty"
            );
        }
        Ok(RiskEngine::with_policy(Arc::new(store), self.scoring)?)
    }
}
