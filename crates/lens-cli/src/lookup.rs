//! # Lookup: print one reference record.
//!
//! ```bash
//! lens lookup profile Japan
//! lens lookup bloc "Gulf Cooperation Council"
//! lens lookup framework islamic_compliance
//! lens lookup sensitivity "Saudi Arabia" islamic_compliance
//! lens lookup sensitivity "Saudi Arabia"          # every rating for the region
//! ```
//!
//! Records are printed as JSON. Unknown profiles, blocs and frameworks are
//! errors; an unrated sensitivity pair prints the MEDIUM default with
//! `"rated": false`.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use lens_core::{BlocName, CulturalProfile, RegionId, SensitivityLevel};
use lens_reference::ReferenceStore;

use crate::to_json;

/// Arguments for `lens lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    #[command(subcommand)]
    pub command: LookupCommand,
}

/// Record kinds that can be looked up.
#[derive(Subcommand, Debug)]
pub enum LookupCommand {
    /// A country's cultural profile and bloc memberships.
    Profile {
        /// Country or market name.
        country: String,
    },

    /// A bloc's member countries.
    Bloc {
        /// Bloc name.
        name: String,
    },

    /// A sensitivity framework and its keywords.
    Framework {
        /// Framework id.
        id: String,
    },

    /// A region's sensitivity to one framework, or all its ratings.
    Sensitivity {
        /// Region name.
        region: String,
        /// Framework id. When omitted, lists every rating for the region.
        framework: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a CulturalProfile,
    blocs: Vec<&'a BlocName>,
}

#[derive(Debug, Serialize)]
struct BlocView<'a> {
    name: &'a str,
    countries: Vec<&'a RegionId>,
}

#[derive(Debug, Serialize)]
struct SensitivityView<'a> {
    region: &'a str,
    framework: &'a str,
    level: SensitivityLevel,
    rated: bool,
}

/// The record for `command`, as JSON.
pub fn lookup(command: &LookupCommand, store: &ReferenceStore) -> Result<Value> {
    let value = match command {
        LookupCommand::Profile { country } => {
            let profile = store
                .get_profile(country)
                .ok_or_else(|| anyhow!("no cultural profile for {country:?}"))?;
            serde_json::to_value(ProfileView {
                profile,
                blocs: store.get_blocs_for(country).iter().collect(),
            })?
        }
        LookupCommand::Bloc { name } => {
            let members = store
                .get_bloc(name)
                .ok_or_else(|| anyhow!("no bloc named {name:?}"))?;
            serde_json::to_value(BlocView {
                name,
                countries: members.iter().collect(),
            })?
        }
        LookupCommand::Framework { id } => {
            let framework = store
                .get_framework(id)
                .ok_or_else(|| anyhow!("no framework with id {id:?}"))?;
            serde_json::to_value(framework)?
        }
        LookupCommand::Sensitivity {
            region,
            framework: Some(framework),
        } => {
            let rated = store.rated_sensitivity(region, framework);
            serde_json::to_value(SensitivityView {
                region,
                framework,
                level: rated.unwrap_or_default(),
                rated: rated.is_some(),
            })?
        }
        LookupCommand::Sensitivity {
            region,
            framework: None,
        } => {
            let mut ratings: Vec<SensitivityView<'_>> = store
                .sensitivities_for(region)
                .map(|(framework, level)| SensitivityView {
                    region,
                    framework: framework.as_str(),
                    level,
                    rated: true,
                })
                .collect();
            ratings.sort_by(|a, b| a.framework.cmp(b.framework));
            serde_json::to_value(ratings)?
        }
    };
    Ok(value)
}

/// Execute `lens lookup`.
pub fn run_lookup(args: &LookupArgs, store: &ReferenceStore) -> Result<u8> {
    let value = lookup(&args.command, store)?;
    println!("{}", to_json(&value)?);
    Ok(0)
}
