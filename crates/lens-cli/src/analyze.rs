//! # Analyze: score a text for a target region.
//!
//! ```bash
//! lens analyze --region Japan --text "Maybe it works, maybe it doesn't"
//! lens analyze --region "Saudi Arabia" --file campaign.txt --format json
//! ```
//!
//! Exit status: 0 LOW, 2 MEDIUM, 3 HIGH.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lens_core::RiskLevel;
use lens_engine::{RegionalAssessment, RiskEngine};

use crate::{to_json, OutputFormat};

/// Arguments for `lens analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Target region (country or market name, e.g. "Japan").
    #[arg(long)]
    pub region: String,

    /// Text to analyze.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text to analyze from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Exit status for a verdict.
pub fn exit_code(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::Low => 0,
        RiskLevel::Medium => 2,
        RiskLevel::High => 3,
    }
}

/// Execute `lens analyze`.
pub fn run_analyze(args: &AnalyzeArgs, engine: &RiskEngine) -> Result<u8> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("one of --text or --file is required"),
    };

    let result = engine.analyze(&text, &args.region);
    let output = match args.format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Json => to_json(&result)?,
    };
    println!("{output}");
    Ok(exit_code(result.assessment.risk_level))
}

/// Human-readable report.
pub fn render_text(result: &RegionalAssessment) -> String {
    TextReport(result).to_string()
}

/// [`RegionalAssessment`] rendered for a terminal.
pub struct TextReport<'a>(pub &'a RegionalAssessment);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let assessment = &result.assessment;
        writeln!(f, "Region:      {}", result.region)?;
        if !result.blocs.is_empty() {
            let blocs: Vec<&str> = result.blocs.iter().map(|b| b.as_str()).collect();
            writeln!(f, "Blocs:       {}", blocs.join(", "))?;
        }
        if !result.profile_available {
            writeln!(f, "Profile:     none (dimension analysis skipped)")?;
        }
        writeln!(
            f,
            "Risk:        {} ({:.2})",
            assessment.risk_level, assessment.final_score
        )?;
        writeln!(
            f,
            "  hofstede    {:>6.2} -> {:>6.2}",
            assessment.hofstede_score, assessment.weighted_hofstede_score
        )?;
        writeln!(
            f,
            "  sensitivity {:>6.2} -> {:>6.2}",
            assessment.sensitivity_score, assessment.weighted_sensitivity_score
        )?;

        if !result.dimension_findings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Cultural dimensions:")?;
            for finding in &result.dimension_findings {
                writeln!(
                    f,
                    "  [{}] {} {}: {}",
                    finding.risk_level, finding.dimension, finding.score, finding.issue
                )?;
                writeln!(f, "      matched: {}", finding.matched_phrases.join(", "))?;
                writeln!(f, "      fix:     {}", finding.recommendation)?;
            }
        }

        if !result.sensitivity_findings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sensitivity frameworks:")?;
            for finding in &result.sensitivity_findings {
                let rated = if finding.rated { "" } else { " (unrated)" };
                writeln!(
                    f,
                    "  [{}] {}: {}{} -> {} (confidence {:.2})",
                    finding.risk_level,
                    finding.framework_name,
                    finding.sensitivity_level,
                    rated,
                    finding.action,
                    finding.confidence
                )?;
                writeln!(f, "      matched: {}", finding.matched_keywords.join(", "))?;
            }
        }

        write!(
            f,
            "\nTotal risks identified: {}",
            assessment.total_risks_identified
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lens_reference::{FrameworkRecord, MemorySource, ProfileRecord, ReferenceStore, SensitivityRecord};

    fn engine() -> RiskEngine {
        let source = MemorySource::new()
            .with_profiles(vec![ProfileRecord {
                country: "Saudi Arabia".into(),
                pdi: 95,
                idv: 25,
                mas: 60,
                uai: 80,
                lto: Some(36),
                ivr: Some(52),
            }])
            .with_frameworks(vec![FrameworkRecord {
                id: "islamic_compliance".into(),
                name: "Islamic Compliance".into(),
                keywords: vec!["alcohol".into()],
            }])
            .with_sensitivity(vec![SensitivityRecord {
                region: "Saudi Arabia".into(),
                framework: "islamic_compliance".into(),
                level: "VERY_HIGH".into(),
            }]);
        RiskEngine::new(Arc::new(ReferenceStore::new(source)))
    }

    fn args(text: &str, format: OutputFormat) -> AnalyzeArgs {
        AnalyzeArgs {
            region: "Saudi Arabia".to_string(),
            text: Some(text.to_string()),
            file: None,
            format,
        }
    }

    #[test]
    fn exit_codes_encode_verdict() {
        assert_eq!(exit_code(RiskLevel::Low), 0);
        assert_eq!(exit_code(RiskLevel::Medium), 2);
        assert_eq!(exit_code(RiskLevel::High), 3);
    }

    #[test]
    fn run_returns_verdict_code() {
        let engine = engine();
        assert_eq!(run_analyze(&args("Quarterly report", OutputFormat::Text), &engine).unwrap(), 0);
        assert_eq!(run_analyze(&args("alcohol", OutputFormat::Json), &engine).unwrap(), 2);
        assert_eq!(
            run_analyze(&args("Hey buddy, alcohol", OutputFormat::Text), &engine).unwrap(),
            3
        );
    }

    #[test]
    fn reads_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy.txt");
        std::fs::write(&path, "Hey buddy, alcohol").unwrap();
        let args = AnalyzeArgs {
            region: "Saudi Arabia".to_string(),
            text: None,
            file: Some(path),
            format: OutputFormat::Text,
        };
        assert_eq!(run_analyze(&args, &engine()).unwrap(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            region: "Saudi Arabia".to_string(),
            text: None,
            file: Some(dir.path().join("absent.txt")),
            format: OutputFormat::Text,
        };
        let err = run_analyze(&args, &engine()).unwrap_err();
        assert!(format!("{err:#}").contains("absent.txt"));
    }

    #[test]
    fn text_report_lists_findings() {
        let result = engine().analyze("Hey buddy, alcohol", "Saudi Arabia");
        let report = render_text(&result);
        assert!(report.contains("Risk:        HIGH (85.00)"));
        assert!(report.contains("[HIGH] PDI 95"));
        assert!(report.contains("Islamic Compliance: VERY_HIGH -> BLOCK_OR_MAJOR_REVISION"));
        assert!(report.contains("Total risks identified: 2"));
        assert!(!report.ends_with('\n'));
    }

    #[test]
    fn text_report_notes_missing_profile() {
        let result = engine().analyze("alcohol", "Atlantis");
        let report = render_text(&result);
        assert!(report.contains("Profile:     none"));
        assert!(report.contains("(unrated)"));
    }
}
