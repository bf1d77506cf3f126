//! # Sensitivity Frameworks
//!
//! A framework is a named keyword detector for one sensitive topic
//! (religious compliance, inclusion language, political references, ...).

use serde::Serialize;

use lens_core::FrameworkId;

/// A keyword-defined sensitivity framework.
///
/// Keywords are kept as written for reporting; a lowercased copy is held
/// for matching. Blank keywords and case-insensitive duplicates are dropped
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitivityFramework {
    id: FrameworkId,
    name: String,
    keywords: Vec<String>,
    #[serde(skip)]
    folded: Vec<String>,
}

impl SensitivityFramework {
    /// Build a framework. An empty `name` falls back to the id.
    pub fn new<I, K>(id: FrameworkId, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let name = name.into();
        let name = if name.trim().is_empty() {
            id.as_str().to_string()
        } else {
            name.trim().to_string()
        };

        let mut kept = Vec::new();
        let mut folded: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }
            let lower = keyword.to_lowercase();
            if folded.contains(&lower) {
                continue;
            }
            kept.push(keyword.to_string());
            folded.push(lower);
        }

        Self {
            id,
            name,
            keywords: kept,
            folded,
        }
    }

    /// Stable machine identifier.
    pub fn id(&self) -> &FrameworkId {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keywords as written in the reference data.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `(original, lowercased)` keyword pairs, in definition order.
    pub fn folded_keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keywords
            .iter()
            .map(String::as_str)
            .zip(self.folded.iter().map(String::as_str))
    }
}
