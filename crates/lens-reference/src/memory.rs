//! # In-Memory Source
//!
//! A [`ReferenceSource`] over records already held in memory, for callers
//! whose loader has done its own fetching and for tests. Individual tables
//! can be marked unavailable to exercise degraded loads.

use crate::source::{
    BlocRecord, FrameworkRecord, ProfileRecord, ReferenceSource, ReferenceTable,
    SensitivityRecord, SourceError,
};

/// Reference records held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    profiles: Result<Vec<ProfileRecord>, String>,
    blocs: Result<Vec<BlocRecord>, String>,
    frameworks: Result<Vec<FrameworkRecord>, String>,
    sensitivity: Result<Vec<SensitivityRecord>, String>,
}

impl MemorySource {
    /// A source with four empty tables.
    pub fn new() -> Self {
        Self {
            profiles: Ok(Vec::new()),
            blocs: Ok(Vec::new()),
            frameworks: Ok(Vec::new()),
            sensitivity: Ok(Vec::new()),
        }
    }

    /// Replace the profile table.
    pub fn with_profiles(mut self, profiles: Vec<ProfileRecord>) -> Self {
        self.profiles = Ok(profiles);
        self
    }

    /// Replace the bloc table.
    pub fn with_blocs(mut self, blocs: Vec<BlocRecord>) -> Self {
        self.blocs = Ok(blocs);
        self
    }

    /// Replace the framework table.
    pub fn with_frameworks(mut self, frameworks: Vec<FrameworkRecord>) -> Self {
        self.frameworks = Ok(frameworks);
        self
    }

    /// Replace the sensitivity matrix.
    pub fn with_sensitivity(mut self, sensitivity: Vec<SensitivityRecord>) -> Self {
        self.sensitivity = Ok(sensitivity);
        self
    }

    /// Make `table` fail with `reason` when fetched.
    pub fn with_unavailable(mut self, table: ReferenceTable, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        match table {
            ReferenceTable::Profiles => self.profiles = Err(reason),
            ReferenceTable::Blocs => self.blocs = Err(reason),
            ReferenceTable::Frameworks => self.frameworks = Err(reason),
            ReferenceTable::Sensitivity => self.sensitivity = Err(reason),
        }
        self
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch<T: Clone>(table: ReferenceTable, held: &Result<Vec<T>, String>) -> Result<Vec<T>, SourceError> {
    held.clone().map_err(|reason| SourceError::Unavailable { table, reason })
}

impl ReferenceSource for MemorySource {
    fn profiles(&self) -> Result<Vec<ProfileRecord>, SourceError> {
        fetch(ReferenceTable::Profiles, &self.profiles)
    }

    fn blocs(&self) -> Result<Vec<BlocRecord>, SourceError> {
        fetch(ReferenceTable::Blocs, &self.blocs)
    }

    fn frameworks(&self) -> Result<Vec<FrameworkRecord>, SourceError> {
        fetch(ReferenceTable::Frameworks, &self.frameworks)
    }

    fn sensitivity(&self) -> Result<Vec<SensitivityRecord>, SourceError> {
        fetch(ReferenceTable::Sensitivity, &self.sensitivity)
    }
}
