//! # lens-reference: Reference Data Store
//!
//! The static reference model the scoring engine reads from:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | profiles | country | six Hofstede scores (LTO, IVR optional) |
//! | blocs | bloc name | member countries |
//! | frameworks | framework id | name + keywords |
//! | sensitivity | (region, framework) | `SensitivityLevel` |
//!
//! plus the derived country → blocs index.
//!
//! The store does not know where the data lives. It reads raw records
//! through the [`ReferenceSource`] trait, validates them, and freezes the
//! result. [`FileSource`] (YAML/JSON files) and [`MemorySource`] are the two
//! sources shipped here.

pub mod file;
pub mod framework;
pub mod matrix;
pub mod memory;
pub mod source;
pub mod store;

// Re-export primary types.
pub use file::{FileSource, ReferencePaths};
pub use framework::SensitivityFramework;
pub use matrix::SensitivityMatrix;
pub use memory::MemorySource;
pub use source::{
    BlocRecord, FrameworkRecord, ProfileRecord, ReferenceSource, ReferenceTable,
    SensitivityRecord, SourceError,
};
pub use store::{CatalogSummary, LoadReport, LoadWarning, ReferenceStore, ReferenceTables};
