//! # Reference Data Store
//!
//! Holds the four static reference tables and the derived country → bloc
//! index. Tables are populated exactly once, from a [`ReferenceSource`],
//! behind a `OnceLock`; afterwards the store is read-only and can be shared
//! across threads behind an `Arc` without locking.
//!
//! ## Load Semantics
//!
//! - [`ReferenceStore::load`] is idempotent. The first call populates the
//!   tables and returns a [`LoadReport`]; later calls return the same report
//!   without touching the source. Accessors trigger the same load, so a
//!   store is never observed half-populated.
//! - Each table loads independently. A table whose source fails is empty and
//!   reported as [`LoadWarning::TableUnavailable`].
//! - Invalid entries (out-of-range score, empty identifier, unknown level,
//!   duplicate key) are dropped one at a time and reported as
//!   [`LoadWarning::EntryRejected`].
//! - Missing data is never an error at lookup time: absent profiles, blocs
//!   and frameworks are `None`, absent bloc memberships are an empty set,
//!   and unrated sensitivity pairs are `Medium`.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use lens_core::{BlocName, CulturalProfile, FrameworkId, RegionId, SensitivityLevel};

use crate::framework::SensitivityFramework;
use crate::matrix::SensitivityMatrix;
use crate::source::{
    BlocRecord, FrameworkRecord, ProfileRecord, ReferenceSource, ReferenceTable,
    SensitivityRecord, SourceError,
};

static NO_BLOCS: BTreeSet<BlocName> = BTreeSet::new();

// ---------------------------------------------------------------------------
// Load reporting
// ---------------------------------------------------------------------------

/// A non-fatal problem encountered while loading reference data.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// The whole table could not be fetched or parsed and is empty.
    #[error("{table} table unavailable: {reason}")]
    TableUnavailable {
        /// Affected table.
        table: ReferenceTable,
        /// Source error text.
        reason: String,
    },

    /// One entry was dropped; the rest of its table loaded.
    #[error("{table} entry {key:?} rejected: {reason}")]
    EntryRejected {
        /// Affected table.
        table: ReferenceTable,
        /// Identifying key of the entry, as written in the source.
        key: String,
        /// Why it was dropped.
        reason: String,
    },
}

/// Sizes of the loaded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogSummary {
    /// Countries with a cultural profile.
    pub profiles: usize,
    /// Cultural blocs.
    pub blocs: usize,
    /// Sensitivity frameworks.
    pub frameworks: usize,
    /// Rated (region, framework) pairs.
    pub sensitivity_entries: usize,
    /// Total lenses in the catalog: profiles + blocs + frameworks.
    pub lens_count: usize,
}

/// Outcome of populating the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Everything that went wrong, in load order.
    pub warnings: Vec<LoadWarning>,
    /// What was loaded.
    pub catalog: CatalogSummary,
}

impl LoadReport {
    /// Whether any table failed as a whole.
    pub fn is_degraded(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, LoadWarning::TableUnavailable { .. }))
    }

    /// Tables that failed as a whole.
    pub fn unavailable_tables(&self) -> Vec<ReferenceTable> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                LoadWarning::TableUnavailable { table, .. } => Some(*table),
                LoadWarning::EntryRejected { .. } => None,
            })
            .collect()
    }

    /// Whether the load produced no warnings at all.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ReferenceTables
// ---------------------------------------------------------------------------

/// The validated reference tables.
///
/// Mutable while being assembled; frozen once handed to a
/// [`ReferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    profiles: HashMap<RegionId, CulturalProfile>,
    blocs: HashMap<BlocName, BTreeSet<RegionId>>,
    /// Derived from `blocs`; rebuilt by [`ReferenceTables::replace_blocs`].
    country_blocs: HashMap<RegionId, BTreeSet<BlocName>>,
    frameworks: Vec<SensitivityFramework>,
    framework_index: HashMap<FrameworkId, usize>,
    matrix: SensitivityMatrix,
}

impl ReferenceTables {
    /// Empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile. Returns `false` (keeping the existing one) if the
    /// country already has a profile.
    pub fn insert_profile(&mut self, profile: CulturalProfile) -> bool {
        if self.profiles.contains_key(&profile.region) {
            return false;
        }
        self.profiles.insert(profile.region.clone(), profile);
        true
    }

    /// Add a bloc and index its members. Returns `false` (keeping the
    /// existing bloc) if the name is taken.
    pub fn insert_bloc(
        &mut self,
        name: BlocName,
        countries: impl IntoIterator<Item = RegionId>,
    ) -> bool {
        if self.blocs.contains_key(&name) {
            return false;
        }
        let members: BTreeSet<RegionId> = countries.into_iter().collect();
        for country in &members {
            self.country_blocs
                .entry(country.clone())
                .or_default()
                .insert(name.clone());
        }
        self.blocs.insert(name, members);
        true
    }

    /// Replace every bloc and recompute the country → bloc index.
    pub fn replace_blocs(&mut self, blocs: HashMap<BlocName, BTreeSet<RegionId>>) {
        self.blocs = blocs;
        self.rebuild_bloc_index();
    }

    fn rebuild_bloc_index(&mut self) {
        self.country_blocs.clear();
        for (bloc, members) in &self.blocs {
            for country in members {
                self.country_blocs
                    .entry(country.clone())
                    .or_default()
                    .insert(bloc.clone());
            }
        }
    }

    /// Append a framework. Returns `false` (keeping the existing one) if
    /// the id is taken.
    pub fn insert_framework(&mut self, framework: SensitivityFramework) -> bool {
        if self.framework_index.contains_key(framework.id()) {
            return false;
        }
        self.framework_index
            .insert(framework.id().clone(), self.frameworks.len());
        self.frameworks.push(framework);
        true
    }

    /// Rate a (region, framework) pair. Returns `false` (keeping the existing
    /// rating) if the pair is already rated.
    pub fn insert_sensitivity(
        &mut self,
        region: RegionId,
        framework: FrameworkId,
        level: SensitivityLevel,
    ) -> bool {
        self.matrix.insert(region, framework, level)
    }

    /// Table sizes.
    pub fn catalog(&self) -> CatalogSummary {
        CatalogSummary {
            profiles: self.profiles.len(),
            blocs: self.blocs.len(),
            frameworks: self.frameworks.len(),
            sensitivity_entries: self.matrix.len(),
            lens_count: self.profiles.len() + self.blocs.len() + self.frameworks.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table population
// ---------------------------------------------------------------------------

/// Validates raw records into [`ReferenceTables`], collecting warnings.
struct TableBuilder {
    tables: ReferenceTables,
    warnings: Vec<LoadWarning>,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            tables: ReferenceTables::new(),
            warnings: Vec::new(),
        }
    }

    fn reject(&mut self, table: ReferenceTable, key: impl Into<String>, reason: impl Into<String>) {
        let warning = LoadWarning::EntryRejected {
            table,
            key: key.into(),
            reason: reason.into(),
        };
        tracing::warn!(table = %table, warning = %warning, "reference entry rejected");
        self.warnings.push(warning);
    }

    /// Unwrap a fetched table, recording a warning and yielding nothing on
    /// failure.
    fn fetched<T>(&mut self, table: ReferenceTable, result: Result<Vec<T>, SourceError>) -> Vec<T> {
        match result {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    table = %table,
                    error = %e,
                    "reference table unavailable, continuing with an empty table"
                );
                self.warnings.push(LoadWarning::TableUnavailable {
                    table,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    fn profiles(&mut self, result: Result<Vec<ProfileRecord>, SourceError>) {
        const TABLE: ReferenceTable = ReferenceTable::Profiles;
        for record in self.fetched(TABLE, result) {
            let region = match RegionId::new(&record.country) {
                Ok(region) => region,
                Err(e) => {
                    self.reject(TABLE, record.country, e.to_string());
                    continue;
                }
            };
            let profile = CulturalProfile::from_scores(
                region,
                record.pdi,
                record.idv,
                record.mas,
                record.uai,
                record.lto,
                record.ivr,
            );
            match profile {
                Ok(profile) => {
                    if !self.tables.insert_profile(profile) {
                        self.reject(TABLE, record.country, "duplicate country; first profile kept");
                    }
                }
                Err(e) => self.reject(TABLE, record.country, e.to_string()),
            }
        }
    }

    fn blocs(&mut self, result: Result<Vec<BlocRecord>, SourceError>) {
        const TABLE: ReferenceTable = ReferenceTable::Blocs;
        let mut blocs: HashMap<BlocName, BTreeSet<RegionId>> = HashMap::new();
        for record in self.fetched(TABLE, result) {
            let name = match BlocName::new(&record.name) {
                Ok(name) => name,
                Err(e) => {
                    self.reject(TABLE, record.name, e.to_string());
                    continue;
                }
            };
            if blocs.contains_key(&name) {
                self.reject(TABLE, record.name, "duplicate bloc; first definition kept");
                continue;
            }
            let mut members = BTreeSet::new();
            for country in &record.countries {
                match RegionId::new(country) {
                    Ok(region) => {
                        members.insert(region);
                    }
                    Err(e) => self.reject(TABLE, format!("{}/{country}", record.name), e.to_string()),
                }
            }
            blocs.insert(name, members);
        }
        self.tables.replace_blocs(blocs);
    }

    fn frameworks(&mut self, result: Result<Vec<FrameworkRecord>, SourceError>) {
        const TABLE: ReferenceTable = ReferenceTable::Frameworks;
        for record in self.fetched(TABLE, result) {
            let id = match FrameworkId::new(&record.id) {
                Ok(id) => id,
                Err(e) => {
                    self.reject(TABLE, record.id, e.to_string());
                    continue;
                }
            };
            let framework = SensitivityFramework::new(id, record.name, &record.keywords);
            if framework.keywords().is_empty() {
                self.reject(TABLE, record.id, "framework has no keywords");
                continue;
            }
            if !self.tables.insert_framework(framework) {
                self.reject(TABLE, record.id, "duplicate framework id; first definition kept");
            }
        }
    }

    fn sensitivity(&mut self, result: Result<Vec<SensitivityRecord>, SourceError>) {
        const TABLE: ReferenceTable = ReferenceTable::Sensitivity;
        for record in self.fetched(TABLE, result) {
            let key = format!("{}/{}", record.region, record.framework);
            let parsed = RegionId::new(&record.region)
                .and_then(|region| Ok((region, FrameworkId::new(&record.framework)?)))
                .and_then(|(region, framework)| {
                    Ok((region, framework, record.level.parse::<SensitivityLevel>()?))
                });
            match parsed {
                Ok((region, framework, level)) => {
                    if !self.tables.insert_sensitivity(region, framework, level) {
                        self.reject(TABLE, key, "duplicate rating; first rating kept");
                    }
                }
                Err(e) => self.reject(TABLE, key, e.to_string()),
            }
        }
    }

    fn finish(self) -> LoadedState {
        let report = LoadReport {
            warnings: self.warnings,
            catalog: self.tables.catalog(),
        };
        LoadedState {
            tables: self.tables,
            report,
        }
    }
}

// ---------------------------------------------------------------------------
// ReferenceStore
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct LoadedState {
    tables: ReferenceTables,
    report: LoadReport,
}

/// Process-wide, read-only reference data.
///
/// `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct ReferenceStore {
    source: Option<Box<dyn ReferenceSource>>,
    state: OnceLock<LoadedState>,
}

impl ReferenceStore {
    /// A store that will populate itself from `source` on first use.
    pub fn new(source: impl ReferenceSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            state: OnceLock::new(),
        }
    }

    /// An already-loaded store over pre-built tables.
    pub fn from_tables(tables: ReferenceTables) -> Self {
        let report = LoadReport {
            warnings: Vec::new(),
            catalog: tables.catalog(),
        };
        Self {
            source: None,
            state: OnceLock::from(LoadedState { tables, report }),
        }
    }

    /// Populate the tables if this has not happened yet, and return the
    /// report of the (single) population.
    ///
    /// Concurrent first calls block on the same initialization; the source
    /// is read exactly once.
    pub fn load(&self) -> &LoadReport {
        &self.state().report
    }

    /// Whether population has already happened.
    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some()
    }

    fn state(&self) -> &LoadedState {
        self.state.get_or_init(|| self.populate())
    }

    fn tables(&self) -> &ReferenceTables {
        &self.state().tables
    }

    fn populate(&self) -> LoadedState {
        let mut builder = TableBuilder::new();
        // Stores built by `from_tables` are initialized at construction and
        // never reach this point without a source.
        if let Some(source) = &self.source {
            builder.profiles(source.profiles());
            builder.blocs(source.blocs());
            builder.frameworks(source.frameworks());
            builder.sensitivity(source.sensitivity());
        }
        let state = builder.finish();
        let catalog = state.report.catalog;
        tracing::info!(
            profiles = catalog.profiles,
            blocs = catalog.blocs,
            frameworks = catalog.frameworks,
            sensitivity_entries = catalog.sensitivity_entries,
            warnings = state.report.warnings.len(),
            "reference data loaded"
        );
        state
    }

    /// The cultural profile of a country, if one is loaded.
    pub fn get_profile(&self, country: &str) -> Option<&CulturalProfile> {
        self.tables().profiles.get(country)
    }

    /// Member countries of a bloc, if the bloc is loaded.
    pub fn get_bloc(&self, name: &str) -> Option<&BTreeSet<RegionId>> {
        self.tables().blocs.get(name)
    }

    /// Every bloc the country belongs to. Empty if none.
    pub fn get_blocs_for(&self, country: &str) -> &BTreeSet<BlocName> {
        self.tables()
            .country_blocs
            .get(country)
            .unwrap_or(&NO_BLOCS)
    }

    /// A framework by id.
    pub fn get_framework(&self, id: &str) -> Option<&SensitivityFramework> {
        let tables = self.tables();
        tables
            .framework_index
            .get(id)
            .and_then(|&index| tables.frameworks.get(index))
    }

    /// Every framework, in load order.
    pub fn get_all_frameworks(&self) -> &[SensitivityFramework] {
        &self.tables().frameworks
    }

    /// The sensitivity of a region to a framework. Unrated pairs are
    /// `Medium`.
    pub fn get_sensitivity(&self, region: &str, framework_id: &str) -> SensitivityLevel {
        self.tables().matrix.get(region, framework_id)
    }

    /// The rated sensitivity of a pair, `None` if unrated.
    pub fn rated_sensitivity(&self, region: &str, framework_id: &str) -> Option<SensitivityLevel> {
        self.tables().matrix.rated(region, framework_id)
    }

    /// Every rating for one region.
    pub fn sensitivities_for(
        &self,
        region: &str,
    ) -> impl Iterator<Item = (&FrameworkId, SensitivityLevel)> {
        self.tables().matrix.region(region)
    }

    /// Countries with a profile, sorted.
    pub fn regions(&self) -> Vec<&RegionId> {
        let mut regions: Vec<_> = self.tables().profiles.keys().collect();
        regions.sort();
        regions
    }

    /// Bloc names, sorted.
    pub fn bloc_names(&self) -> Vec<&BlocName> {
        let mut names: Vec<_> = self.tables().blocs.keys().collect();
        names.sort();
        names
    }

    /// Table sizes.
    pub fn catalog(&self) -> CatalogSummary {
        self.state().report.catalog
    }
}
