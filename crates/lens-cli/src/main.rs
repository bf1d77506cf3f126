//! # lens CLI entry point
//!
//! Parses command-line arguments, loads configuration and reference data,
//! and dispatches to subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lens_cli::analyze::{run_analyze, AnalyzeArgs};
use lens_cli::catalog::{run_catalog, CatalogArgs};
use lens_cli::config::{LensConfig, DEFAULT_CONFIG_FILE};
use lens_cli::lookup::{run_lookup, LookupArgs};

/// Cultural Lens Stack CLI
///
/// Scores content for cultural and regulatory sensitivity in a target
/// region, using Hofstede cultural profiles and a region × framework
/// sensitivity matrix.
#[derive(Parser, Debug)]
#[command(name = "lens", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./lens.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the standard reference files, used when no
    /// configuration file is found.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a text for a target region.
    Analyze(AnalyzeArgs),

    /// Show loaded reference tables and load warnings.
    Catalog(CatalogArgs),

    /// Look up a profile, bloc, framework or sensitivity rating.
    Lookup(LookupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "lens CLI starting");

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = LensConfig::resolve(
        cli.config.as_deref(),
        Path::new(DEFAULT_CONFIG_FILE),
        &cli.data_dir,
    )?;
    let engine = config.build_engine()?;

    match &cli.command {
        Commands::Analyze(args) => run_analyze(args, &engine),
        Commands::Catalog(args) => run_catalog(args, engine.store()),
        Commands::Lookup(args) => run_lookup(args, engine.store()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_cli::lookup::LookupCommand;
    use lens_cli::OutputFormat;

    #[test]
    fn cli_parse_analyze_text() {
        let cli = Cli::try_parse_from(["lens", "analyze", "--region", "Japan", "--text", "maybe"])
            .unwrap();
        if let Commands::Analyze(args) = cli.command {
            assert_eq!(args.region, "Japan");
            assert_eq!(args.text.as_deref(), Some("maybe"));
            assert!(args.file.is_none());
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("expected analyze");
        }
        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parse_analyze_file_json() {
        let cli = Cli::try_parse_from([
            "lens", "analyze", "--region", "Japan", "--file", "copy.txt", "--format", "json",
        ])
        .unwrap();
        if let Commands::Analyze(args) = cli.command {
            assert_eq!(args.file, Some(PathBuf::from("copy.txt")));
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("expected analyze");
        }
    }

    #[test]
    fn cli_analyze_requires_text_or_file() {
        assert!(Cli::try_parse_from(["lens", "analyze", "--region", "Japan"]).is_err());
    }

    #[test]
    fn cli_analyze_rejects_text_and_file() {
        assert!(Cli::try_parse_from([
            "lens", "analyze", "--region", "Japan", "--text", "x", "--file", "y",
        ])
        .is_err());
    }

    #[test]
    fn cli_analyze_requires_region() {
        assert!(Cli::try_parse_from(["lens", "analyze", "--text", "x"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "lens", "-vv", "--config", "conf/lens.yaml", "--data-dir", "ref", "catalog",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("conf/lens.yaml")));
        assert_eq!(cli.data_dir, PathBuf::from("ref"));
        assert!(matches!(cli.command, Commands::Catalog(_)));
    }

    #[test]
    fn cli_parse_lookup_sensitivity() {
        let cli = Cli::try_parse_from([
            "lens",
            "lookup",
            "sensitivity",
            "Saudi Arabia",
            "islamic_compliance",
        ])
        .unwrap();
        if let Commands::Lookup(args) = cli.command {
            match args.command {
                LookupCommand::Sensitivity { region, framework } => {
                    assert_eq!(region, "Saudi Arabia");
                    assert_eq!(framework.as_deref(), Some("islamic_compliance"));
                }
                other => panic!("unexpected {other:?}"),
            }
        } else {
            panic!("expected lookup");
        }
    }

    #[test]
    fn cli_parse_lookup_profile() {
        let cli = Cli::try_parse_from(["lens", "lookup", "profile", "Japan"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lookup(LookupArgs {
                command: LookupCommand::Profile { .. }
            })
        ));
    }

    #[test]
    fn run_against_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("frameworks.yaml"),
            "- id: gambling\n  name: Gambling\n  keywords: [casino]\n",
        )
        .unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "lens",
            "--config",
            dir.path().join("absent.yaml").to_str().unwrap(),
            "catalog",
        ])
        .unwrap();
        assert!(run(&cli).is_err());

        let cli = Cli::try_parse_from([
            "lens", "--data-dir", data_dir, "analyze", "--region", "Monaco", "--text", "casino",
        ])
        .unwrap();
        // Unrated pair: MEDIUM sensitivity alone scores 35, LOW.
        assert_eq!(run(&cli).unwrap(), 0);
    }
}
