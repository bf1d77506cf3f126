//! # Catalog: what reference data is loaded.
//!
//! Prints table sizes, every load warning, and the region, bloc and
//! framework inventories.

use std::fmt;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lens_reference::{CatalogSummary, LoadWarning, ReferenceStore};

use crate::{to_json, OutputFormat};

/// Arguments for `lens catalog`.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Catalog report.
#[derive(Debug, Serialize)]
pub struct CatalogReport<'a> {
    /// Table sizes.
    pub summary: CatalogSummary,
    /// Load warnings in load order.
    pub warnings: &'a [LoadWarning],
    /// Profiled regions, sorted.
    pub regions: Vec<&'a str>,
    /// Bloc names, sorted.
    pub blocs: Vec<&'a str>,
    /// Framework ids, in load order.
    pub frameworks: Vec<&'a str>,
}

impl<'a> CatalogReport<'a> {
    /// Snapshot of a store.
    pub fn of(store: &'a ReferenceStore) -> Self {
        let report = store.load();
        Self {
            summary: report.catalog,
            warnings: &report.warnings,
            regions: store.regions().into_iter().map(|r| r.as_str()).collect(),
            blocs: store.bloc_names().into_iter().map(|b| b.as_str()).collect(),
            frameworks: store
                .get_all_frameworks()
                .iter()
                .map(|f| f.id().as_str())
                .collect(),
        }
    }

    /// Human-readable rendering.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "Profiles:             {}", s.profiles)?;
        writeln!(f, "Blocs:                {}", s.blocs)?;
        writeln!(f, "Frameworks:           {}", s.frameworks)?;
        writeln!(f, "Sensitivity entries:  {}", s.sensitivity_entries)?;
        write!(f, "Lenses:               {}", s.lens_count)?;
        if !self.warnings.is_empty() {
            write!(f, "\n\nWarnings ({}):", self.warnings.len())?;
            for warning in self.warnings {
                write!(f, "\n  {warning}")?;
            }
        }
        for (title, items) in [
            ("Regions", &self.regions),
            ("Blocs", &self.blocs),
            ("Frameworks", &self.frameworks),
        ] {
            if !items.is_empty() {
                write!(f, "\n\n{title}: {}", items.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Execute `lens catalog`.
pub fn run_catalog(args: &CatalogArgs, store: &ReferenceStore) -> Result<u8> {
    let report = CatalogReport::of(store);
    let output = match args.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => to_json(&report)?,
    };
    println!("{output}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_reference::{BlocRecord, FrameworkRecord, MemorySource, ProfileRecord, ReferenceTable};

    fn store() -> ReferenceStore {
        ReferenceStore::new(
            MemorySource::new()
                .with_profiles(vec![
                    ProfileRecord {
                        country: "Sweden".into(),
                        pdi: 31,
                        idv: 71,
                        mas: 5,
                        uai: 29,
                        lto: Some(53),
                        ivr: Some(78),
                    },
                    ProfileRecord {
                        country: "Japan".into(),
                        pdi: 54,
                        idv: 46,
                        mas: 95,
                        uai: 92,
                        lto: Some(88),
                        ivr: Some(42),
                    },
                ])
                .with_blocs(vec![BlocRecord {
                    name: "Nordic".into(),
                    countries: vec!["Sweden".into()],
                }])
                .with_frameworks(vec![FrameworkRecord {
                    id: "gambling".into(),
                    name: "Gambling".into(),
                    keywords: vec!["casino".into()],
                }])
                .with_unavailable(ReferenceTable::Sensitivity, "file missing"),
        )
    }

    #[test]
    fn report_inventories_store() {
        let store = store();
        let report = CatalogReport::of(&store);
        assert_eq!(report.summary.profiles, 2);
        assert_eq!(report.summary.lens_count, 4);
        assert_eq!(report.regions, vec!["Japan", "Sweden"]);
        assert_eq!(report.blocs, vec!["Nordic"]);
        assert_eq!(report.frameworks, vec!["gambling"]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn text_lists_warnings() {
        let store = store();
        let text = CatalogReport::of(&store).render_text();
        assert!(text.contains("Lenses:               4"));
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("file missing"));
        assert!(text.contains("Regions: Japan, Sweden"));
        assert!(text.ends_with("Frameworks: gambling"));
    }

    #[test]
    fn json_carries_warning_kind() {
        let store = store();
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&CatalogReport::of(&store)).unwrap()).unwrap();
        assert_eq!(json["warnings"][0]["kind"], "table_unavailable");
        assert_eq!(json["summary"]["frameworks"], 1);
    }

    #[test]
    fn run_succeeds() {
        let store = store();
        let args = CatalogArgs {
            format: OutputFormat::Json,
        };
        assert_eq!(run_catalog(&args, &store).unwrap(), 0);
    }
}
