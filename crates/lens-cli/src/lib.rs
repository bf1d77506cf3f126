//! # lens-cli: Operator CLI for the Cultural Lens Stack
//!
//! Provides the `lens` command-line interface over a file-backed
//! [`ReferenceStore`](lens_reference::ReferenceStore).
//!
//! ## Subcommands
//!
//! - `lens analyze`: score a text for a target region. The exit status
//!   encodes the verdict (0 LOW, 2 MEDIUM, 3 HIGH; 1 is reserved for errors)
//!   so the command can gate a publishing step.
//! - `lens catalog`: table sizes, load warnings and inventory.
//! - `lens lookup`: one profile, bloc, framework or sensitivity rating.
//!
//! ```bash
//! lens analyze --region "Saudi Arabia" --text "Hey buddy, grab a beer"
//! lens --data-dir ./data catalog --format json
//! lens lookup sensitivity "Saudi Arabia" islamic_compliance
//! ```

pub mod analyze;
pub mod catalog;
pub mod config;
pub mod lookup;

use clap::ValueEnum;
use serde::Serialize;

/// Output format shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Pretty JSON rendering of any report.
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
