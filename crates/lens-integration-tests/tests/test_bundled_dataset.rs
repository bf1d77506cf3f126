//! End-to-end scenarios over the reference dataset shipped in `data/`.
//!
//! Every test builds its own file-backed store, so each one also exercises
//! the YAML loader and the one-shot population path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lens_cli::config::LensConfig;
use lens_core::{Dimension, RiskLevel, SensitivityAction, SensitivityLevel};
use lens_engine::{LensKind, RiskEngine};
use lens_reference::{FileSource, ReferenceStore};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn engine() -> RiskEngine {
    RiskEngine::new(Arc::new(ReferenceStore::new(FileSource::from_dir(data_dir()))))
}

#[test]
fn bundled_dataset_loads_clean() {
    let engine = engine();
    let report = engine.store().load();
    assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(report.catalog.profiles, 20);
    assert_eq!(report.catalog.blocs, 9);
    assert_eq!(report.catalog.frameworks, 7);
    assert_eq!(report.catalog.sensitivity_entries, 56);
    assert_eq!(report.catalog.lens_count, 36);
}

#[test]
fn alcohol_for_saudi_arabia_is_blocked() {
    let result = engine().analyze("Try our new alcohol-free range", "Saudi Arabia");

    assert_eq!(result.sensitivity_findings.len(), 1);
    let finding = &result.sensitivity_findings[0];
    assert_eq!(finding.framework_id.as_str(), "islamic_compliance");
    assert_eq!(finding.sensitivity_level, SensitivityLevel::VeryHigh);
    assert_eq!(finding.risk_level, RiskLevel::High);
    assert_eq!(finding.action, SensitivityAction::BlockOrMajorRevision);
    assert_eq!(finding.confidence, 0.95);
    assert_eq!(finding.matched_keywords, vec!["alcohol"]);

    assert!(result.dimension_findings.is_empty());
    assert_eq!(result.assessment.final_score, 59.5);
    assert_eq!(result.assessment.risk_level, RiskLevel::Medium);
}

#[test]
fn informal_alcohol_pitch_for_saudi_arabia_is_high() {
    let result = engine().analyze("Hey buddy, grab a cold beer", "Saudi Arabia");

    assert_eq!(result.dimension_findings.len(), 1);
    assert_eq!(result.dimension_findings[0].dimension, Dimension::PowerDistance);
    assert_eq!(result.dimension_findings[0].risk_level, RiskLevel::High);

    let assessment = &result.assessment;
    assert_eq!(assessment.weighted_hofstede_score, 25.5);
    assert_eq!(assessment.weighted_sensitivity_score, 59.5);
    assert_eq!(assessment.final_score, 85.0);
    assert_eq!(assessment.risk_level, RiskLevel::High);

    let kinds: Vec<_> = assessment.triggered_lenses.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LensKind::Hofstede, LensKind::Sensitivity]);
    assert_eq!(assessment.total_risks_identified, 2);
}

#[test]
fn informal_greeting_in_high_power_distance_region() {
    // China: PDI 80.
    let result = engine().analyze("hey buddy, let's do this", "China");

    assert!(result.sensitivity_findings.is_empty());
    assert_eq!(result.dimension_findings.len(), 1);
    let finding = &result.dimension_findings[0];
    assert_eq!(finding.dimension, Dimension::PowerDistance);
    assert_eq!(finding.score.value(), 80);
    assert_eq!(finding.risk_level, RiskLevel::High);
    assert!(finding.issue.contains("Informal language inappropriate"));

    assert_eq!(result.assessment.hofstede_score, 85.0);
    assert_eq!(result.assessment.final_score, 25.5);
    assert_eq!(result.assessment.risk_level, RiskLevel::Low);
}

#[test]
fn competitive_tone_in_feminine_culture() {
    let result = engine().analyze("Crush the competition and dominate the market", "Sweden");
    assert_eq!(result.dimension_findings.len(), 1);
    assert_eq!(result.dimension_findings[0].dimension, Dimension::Masculinity);
    assert_eq!(
        result.dimension_findings[0].matched_phrases,
        vec!["crush the competition", "dominate"]
    );
}

#[test]
fn vague_claims_in_high_uncertainty_avoidance_culture() {
    let result = engine().analyze("Results may vary. Maybe it works for you.", "Japan");
    assert_eq!(result.dimension_findings.len(), 1);
    assert_eq!(
        result.dimension_findings[0].dimension,
        Dimension::UncertaintyAvoidance
    );
}

#[test]
fn missing_optional_dimensions_are_skipped() {
    // United Arab Emirates has no LTO or IVR score.
    let result = engine().analyze("Instant results. Treat yourself.", "United Arab Emirates");
    assert!(result.profile_available);
    assert!(result.dimension_findings.is_empty());
}

#[test]
fn unknown_region_defaults_to_medium() {
    let result = engine().analyze("Casino night!", "Atlantis");
    assert!(!result.profile_available);
    assert!(result.blocs.is_empty());
    assert!(result.dimension_findings.is_empty());

    let finding = &result.sensitivity_findings[0];
    assert!(!finding.rated);
    assert_eq!(finding.sensitivity_level, SensitivityLevel::Medium);
    assert_eq!(finding.risk_level, RiskLevel::Medium);
    assert_eq!(finding.action, SensitivityAction::SuggestRevision);
    assert_eq!(finding.confidence, 0.70);

    assert_eq!(result.assessment.final_score, 35.0);
    assert_eq!(result.assessment.risk_level, RiskLevel::Low);
}

#[test]
fn neutral_region_takes_no_action() {
    let result = engine().analyze("Pair it with a glass of wine", "Sweden");
    let finding = &result.sensitivity_findings[0];
    assert_eq!(finding.sensitivity_level, SensitivityLevel::Neutral);
    assert_eq!(finding.action, SensitivityAction::NoAction);
    assert_eq!(result.assessment.final_score, 14.0);
}

#[test]
fn keyword_detection_is_case_insensitive() {
    let matches = engine().detect("Reduce ALCOHOL consumption");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].framework_id.as_str(), "islamic_compliance");
}

#[test]
fn clean_text_scores_zero() {
    let result = engine().analyze("Quarterly figures are attached for review.", "Germany");
    assert_eq!(result.assessment.final_score, 0.0);
    assert_eq!(result.assessment.risk_level, RiskLevel::Low);
    assert_eq!(result.assessment.total_risks_identified, 0);
}

#[test]
fn region_blocs_are_reported_sorted() {
    let result = engine().analyze("", "Saudi Arabia");
    let blocs: Vec<_> = result.blocs.iter().map(|b| b.as_str()).collect();
    assert_eq!(blocs, vec!["Arab World", "Gulf Cooperation Council"]);
}

#[test]
fn bloc_index_is_consistent_both_ways() {
    let engine = engine();
    let store = engine.store();
    for bloc in store.bloc_names() {
        let members = store.get_bloc(bloc.as_str()).unwrap();
        for country in members {
            assert!(
                store.get_blocs_for(country.as_str()).contains(bloc),
                "{country} missing back-reference to {bloc}"
            );
        }
    }
    for region in store.regions() {
        for bloc in store.get_blocs_for(region.as_str()) {
            assert!(store.get_bloc(bloc.as_str()).unwrap().contains(region));
        }
    }
}

#[test]
fn root_config_file_drives_the_same_dataset() {
    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lens.yaml");
    let config = LensConfig::from_file(&config_path).unwrap();
    let engine = config.build_engine().unwrap();
    assert!(engine.store().load().is_clean());
    assert_eq!(engine.policy().sensitivity_weight, 0.70);
    assert_eq!(
        engine
            .analyze("Hey buddy, grab a cold beer", "Saudi Arabia")
            .assessment
            .risk_level,
        RiskLevel::High
    );
}

#[test]
fn store_loads_once_under_concurrent_analysis() {
    let engine = engine();
    let handles: Vec<_> = ["Saudi Arabia", "Japan", "Sweden", "China"]
        .into_iter()
        .map(|region| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.analyze("alcohol, maybe", region))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(engine.store().is_loaded());
    assert!(results.iter().all(|r| r.sensitivity_findings.len() == 1));
    // Saudi Arabia: UAI 80 flags "maybe" on top of the VERY_HIGH alcohol rating.
    assert_eq!(results[0].assessment.risk_level, RiskLevel::High);
}

#[test]
fn assessment_serializes_to_json() {
    let result = engine().analyze("Hey buddy, grab a cold beer", "Saudi Arabia");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["assessment"]["risk_level"], "HIGH");
    assert_eq!(json["assessment"]["final_score"], 85.0);
    assert_eq!(json["assessment"]["triggered_lenses"][0]["type"], "hofstede");
    assert_eq!(json["sensitivity_findings"][0]["sensitivity_level"], "VERY_HIGH");
    assert_eq!(json["blocs"][1], "Gulf Cooperation Council");
}
