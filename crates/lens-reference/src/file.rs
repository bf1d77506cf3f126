//! # File Source
//!
//! Reads each reference table from its own YAML or JSON document. The format
//! is chosen by file extension (`.yaml`/`.yml` → `serde_yaml`, `.json` →
//! `serde_json`).
//!
//! ## Document Shapes
//!
//! ```yaml
//! # profiles.yaml
//! - country: Japan
//!   pdi: 54
//!   idv: 46
//!   mas: 95
//!   uai: 92
//!   lto: 88      # optional
//!   ivr: 42      # optional
//!
//! # blocs.yaml
//! - name: East Asia
//!   countries: [Japan, China, South Korea]
//!
//! # frameworks.yaml
//! - id: islamic_compliance
//!   name: Islamic Compliance
//!   keywords: [alcohol, pork, gambling]
//!
//! # sensitivity.yaml: region → framework → level
//! Saudi Arabia:
//!   islamic_compliance: VERY_HIGH
//! ```
//!
//! The sensitivity matrix may also be a flat list of
//! `{region, framework, level}` records.
//!
//! Matrix cells keep document order and repeated keys, and a cell whose level
//! is not a string is passed through as text. The store then rejects each bad
//! or duplicate cell on its own instead of losing the whole table.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::source::{
    BlocRecord, FrameworkRecord, ProfileRecord, ReferenceSource, SensitivityRecord, SourceError,
};

/// Standard file name of the profile table inside a data directory.
pub const PROFILES_FILE: &str = "profiles.yaml";
/// Standard file name of the bloc table.
pub const BLOCS_FILE: &str = "blocs.yaml";
/// Standard file name of the framework table.
pub const FRAMEWORKS_FILE: &str = "frameworks.yaml";
/// Standard file name of the sensitivity matrix.
pub const SENSITIVITY_FILE: &str = "sensitivity.yaml";

/// Locations of the four reference documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePaths {
    /// Profile table.
    pub profiles: PathBuf,
    /// Bloc table.
    pub blocs: PathBuf,
    /// Framework table.
    pub frameworks: PathBuf,
    /// Sensitivity matrix.
    pub sensitivity: PathBuf,
}

impl ReferencePaths {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            profiles: dir.join(PROFILES_FILE),
            blocs: dir.join(BLOCS_FILE),
            frameworks: dir.join(FRAMEWORKS_FILE),
            sensitivity: dir.join(SENSITIVITY_FILE),
        }
    }

    /// Resolve relative paths against `base`. Absolute paths are kept.
    pub fn resolved_against(&self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };
        Self {
            profiles: resolve(&self.profiles),
            blocs: resolve(&self.blocs),
            frameworks: resolve(&self.frameworks),
            sensitivity: resolve(&self.sensitivity),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SensitivityDocument {
    Nested(Entries<Entries<LevelCell>>),
    Flat(Vec<FlatSensitivityRecord>),
}

#[derive(Deserialize)]
struct FlatSensitivityRecord {
    region: String,
    framework: String,
    level: LevelCell,
}

/// A map read as its entries in document order, repeated keys included.
struct Entries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// A sensitivity level cell as written. Numbers, booleans and empty values
/// become their text form; nested values become `""`.
struct LevelCell(String);

impl<'de> Deserialize<'de> for LevelCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelCellVisitor;

        impl<'de> Visitor<'de> for LevelCellVisitor {
            type Value = LevelCell;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sensitivity level")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(LevelCell(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(LevelCell(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(LevelCell(String::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(LevelCell(String::new()))
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                d.deserialize_any(self)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(LevelCell(String::new()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(LevelCell(String::new()))
            }
        }

        deserializer.deserialize_any(LevelCellVisitor)
    }
}

/// A [`ReferenceSource`] backed by four files on disk.
///
/// Files are read on every fetch; the store fetches each table once.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: ReferencePaths,
}

impl FileSource {
    /// A source reading the given files.
    pub fn new(paths: ReferencePaths) -> Self {
        Self { paths }
    }

    /// A source reading the standard file names inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(ReferencePaths::in_dir(dir))
    }

    /// The files this source reads.
    pub fn paths(&self) -> &ReferencePaths {
        &self.paths
    }
}

impl ReferenceSource for FileSource {
    fn profiles(&self) -> Result<Vec<ProfileRecord>, SourceError> {
        read_document(&self.paths.profiles)
    }

    fn blocs(&self) -> Result<Vec<BlocRecord>, SourceError> {
        read_document(&self.paths.blocs)
    }

    fn frameworks(&self) -> Result<Vec<FrameworkRecord>, SourceError> {
        read_document(&self.paths.frameworks)
    }

    fn sensitivity(&self) -> Result<Vec<SensitivityRecord>, SourceError> {
        let document: SensitivityDocument = read_document(&self.paths.sensitivity)?;
        Ok(match document {
            SensitivityDocument::Flat(records) => records
                .into_iter()
                .map(|record| SensitivityRecord {
                    region: record.region,
                    framework: record.framework,
                    level: record.level.0,
                })
                .collect(),
            SensitivityDocument::Nested(Entries(regions)) => regions
                .into_iter()
                .flat_map(|(region, Entries(frameworks))| {
                    frameworks
                        .into_iter()
                        .map(move |(framework, level)| SensitivityRecord {
                            region: region.clone(),
                            framework,
                            level: level.0,
                        })
                })
                .collect(),
        })
    }
}

/// Read and decode one document, choosing the decoder by extension.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| SourceError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
        }
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_yaml_profiles_with_optional_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            PROFILES_FILE,
            "- country: Japan\n  pdi: 54\n  idv: 46\n  mas: 95\n  uai: 92\n  lto: 88\n  ivr: 42\n\
             - country: UAE\n  pdi: 90\n  idv: 25\n  mas: 50\n  uai: 80\n",
        );
        let source = FileSource::from_dir(dir.path());
        let profiles = source.profiles().unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].country, "Japan");
        assert_eq!(profiles[0].lto, Some(88));
        assert_eq!(profiles[1].lto, None);
        assert_eq!(profiles[1].ivr, None);
    }

    #[test]
    fn reads_json_frameworks_preserving_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "frameworks.json",
            r#"[{"id":"zeta","name":"Zeta","keywords":["z"]},
                {"id":"alpha","name":"Alpha","keywords":["a"]}]"#,
        );
        let mut paths = ReferencePaths::in_dir(dir.path());
        paths.frameworks = path;
        let ids: Vec<_> = FileSource::new(paths)
            .frameworks()
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn reads_nested_sensitivity_matrix() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            SENSITIVITY_FILE,
            "Saudi Arabia:\n  islamic_compliance: VERY_HIGH\n  lgbtq_inclusion: HIGH\nSweden:\n  islamic_compliance: LOW\n",
        );
        let records = FileSource::from_dir(dir.path()).sensitivity().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.contains(&SensitivityRecord {
            region: "Saudi Arabia".into(),
            framework: "islamic_compliance".into(),
            level: "VERY_HIGH".into(),
        }));
    }

    #[test]
    fn reads_flat_sensitivity_matrix() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            SENSITIVITY_FILE,
            "- region: Japan\n  framework: gambling\n  level: HIGH\n",
        );
        let records = FileSource::from_dir(dir.path()).sensitivity().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "HIGH");
    }

    #[test]
    fn nested_cells_keep_document_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            SENSITIVITY_FILE,
            "Sweden:\n  gambling: LOW\nJapan:\n  gambling: HIGH\n  alcohol: LOW\n",
        );
        let keys: Vec<_> = FileSource::from_dir(dir.path())
            .sensitivity()
            .unwrap()
            .into_iter()
            .map(|r| format!("{}/{}", r.region, r.framework))
            .collect();
        assert_eq!(keys, vec!["Sweden/gambling", "Japan/gambling", "Japan/alcohol"]);
    }

    #[test]
    fn non_string_levels_are_passed_through_as_text() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            SENSITIVITY_FILE,
            "Saudi Arabia:\n  islamic_compliance: VERY_HIGH\n  gambling: 3\n  alcohol:\n  gender_roles: [HIGH]\n",
        );
        let levels: Vec<_> = FileSource::from_dir(dir.path())
            .sensitivity()
            .unwrap()
            .into_iter()
            .map(|r| (r.framework, r.level))
            .collect();
        assert_eq!(
            levels,
            vec![
                ("islamic_compliance".to_string(), "VERY_HIGH".to_string()),
                ("gambling".to_string(), "3".to_string()),
                ("alcohol".to_string(), String::new()),
                ("gender_roles".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn flat_json_levels_may_be_non_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "sensitivity.json",
            r#"[{"region": "Japan", "framework": "gambling", "level": "HIGH"},
                {"region": "Japan", "framework": "alcohol", "level": null}]"#,
        );
        let mut paths = ReferencePaths::in_dir(dir.path());
        paths.sensitivity = path;
        let records = FileSource::new(paths).sensitivity().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].level, "");
    }

    #[test]
    fn repeated_nested_keys_are_all_returned() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            SENSITIVITY_FILE,
            "Saudi Arabia:\n  islamic_compliance: VERY_HIGH\n  islamic_compliance: LOW\n",
        );
        let levels: Vec<_> = FileSource::from_dir(dir.path())
            .sensitivity()
            .unwrap()
            .into_iter()
            .map(|r| r.level)
            .collect();
        assert_eq!(levels, vec!["VERY_HIGH", "LOW"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::from_dir(dir.path()).blocs().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), BLOCS_FILE, "- name: [unclosed\n");
        let err = FileSource::from_dir(dir.path()).blocs().unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "blocs.toml", "x = 1\n");
        let mut paths = ReferencePaths::in_dir(dir.path());
        paths.blocs = path;
        let err = FileSource::new(paths).blocs().unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat { .. }));
    }

    #[test]
    fn resolved_against_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("elsewhere.yaml");
        let paths = ReferencePaths {
            profiles: PathBuf::from("data/profiles.yaml"),
            blocs: absolute.clone(),
            frameworks: PathBuf::from("frameworks.yaml"),
            sensitivity: PathBuf::from("sensitivity.yaml"),
        };
        let resolved = paths.resolved_against("/etc/lens");
        assert_eq!(resolved.profiles, PathBuf::from("/etc/lens/data/profiles.yaml"));
        assert_eq!(resolved.blocs, absolute);
    }
}
