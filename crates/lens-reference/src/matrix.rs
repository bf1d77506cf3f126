//! # Region Sensitivity Matrix
//!
//! Maps (region, framework) pairs to a [`SensitivityLevel`].
//!
//! An absent pair is not an error. [`SensitivityMatrix::get`] resolves it to
//! [`SensitivityLevel::Medium`]; [`SensitivityMatrix::rated`] exposes the
//! distinction for callers that need it.

use std::collections::HashMap;

use lens_core::{FrameworkId, RegionId, SensitivityLevel};

/// The region × framework sensitivity table.
#[derive(Debug, Clone, Default)]
pub struct SensitivityMatrix {
    /// region → (framework → level).
    levels: HashMap<RegionId, HashMap<FrameworkId, SensitivityLevel>>,
}

impl SensitivityMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rated level for a pair, `None` if the pair is unrated.
    pub fn rated(&self, region: &str, framework: &str) -> Option<SensitivityLevel> {
        self.levels
            .get(region)
            .and_then(|frameworks| frameworks.get(framework))
            .copied()
    }

    /// The level for a pair. Unrated pairs are `Medium`.
    pub fn get(&self, region: &str, framework: &str) -> SensitivityLevel {
        self.rated(region, framework).unwrap_or_default()
    }

    /// Rate a pair. Returns `false` and keeps the existing rating if the pair
    /// is already rated.
    pub fn insert(
        &mut self,
        region: RegionId,
        framework: FrameworkId,
        level: SensitivityLevel,
    ) -> bool {
        let frameworks = self.levels.entry(region).or_default();
        if frameworks.contains_key(&framework) {
            return false;
        }
        frameworks.insert(framework, level);
        true
    }

    /// All ratings for one region.
    pub fn region(&self, region: &str) -> impl Iterator<Item = (&FrameworkId, SensitivityLevel)> {
        self.levels
            .get(region)
            .into_iter()
            .flat_map(|frameworks| frameworks.iter().map(|(id, level)| (id, *level)))
    }

    /// Number of rated pairs.
    pub fn len(&self) -> usize {
        self.levels.values().map(HashMap::len).sum()
    }

    /// Whether no pair is rated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
