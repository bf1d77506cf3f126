//! # lens-core: Foundational Types for the Cultural Lens Stack
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace. This crate depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `RegionId`, `BlocName` and
//!    `FrameworkId` are distinct types with validated constructors. A bloc
//!    name cannot be passed where a framework id is expected.
//!
//! 2. **Closed level enums.** `SensitivityLevel` and `RiskLevel` are the only
//!    valid severity vocabularies. Every `match` on them is exhaustive.
//!
//! 3. **Validated dimension scores.** `DimensionScore` only holds values in
//!    `0..=100`, so a `CulturalProfile` is in range by construction.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lens-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod dimension;
pub mod error;
pub mod identity;
pub mod level;

// Re-export primary types for ergonomic imports.
pub use dimension::{CulturalProfile, Dimension, DimensionScore, DIMENSION_COUNT};
pub use error::LensError;
pub use identity::{BlocName, FrameworkId, RegionId};
pub use level::{RiskLevel, SensitivityAction, SensitivityLevel};
