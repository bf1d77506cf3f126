//! # Keyword Detector
//!
//! Scans text against every loaded sensitivity framework. A framework is
//! reported only if at least one of its keywords occurs in the text
//! (case-insensitive substring); every matching keyword is listed, not just
//! the first. Output follows framework load order.

use serde::Serialize;

use lens_core::FrameworkId;
use lens_reference::ReferenceStore;

use crate::matching::{contains_keyword, fold};

/// A framework whose keywords occur in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkMatch {
    /// Framework id.
    pub framework_id: FrameworkId,
    /// Framework name.
    pub framework_name: String,
    /// Matched keywords, as written in the framework definition.
    pub matched_keywords: Vec<String>,
    /// `matched_keywords.len()`.
    pub keyword_count: usize,
}

/// Detects sensitivity frameworks in text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordDetector<'a> {
    store: &'a ReferenceStore,
}

impl<'a> KeywordDetector<'a> {
    /// A detector over the store's frameworks.
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    /// Every framework with at least one keyword present in `text`.
    pub fn detect(&self, text: &str) -> Vec<FrameworkMatch> {
        let folded = fold(text);
        self.store
            .get_all_frameworks()
            .iter()
            .filter_map(|framework| {
                let matched_keywords: Vec<String> = framework
                    .folded_keywords()
                    .filter(|(_, keyword)| contains_keyword(&folded, keyword))
                    .map(|(original, _)| original.to_string())
                    .collect();
                if matched_keywords.is_empty() {
                    return None;
                }
                Some(FrameworkMatch {
                    framework_id: framework.id().clone(),
                    framework_name: framework.name().to_string(),
                    keyword_count: matched_keywords.len(),
                    matched_keywords,
                })
            })
            .collect()
    }
}
