//! Typed manifest schema and parsing
//!
//! The manifest is a JSON object mapping locale codes to entries describing
//! where each locale's string data lives. Keys starting with `notes` are
//! reserved for manifest-author comments and never become locales.

use crate::error::{EntryError, LangError, LangResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

fn unknown() -> String {
    "Unknown".to_string()
}

/// One manifest entry: where a locale's data lives, plus metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// Path to a single JSON file or a directory of JSON files
    pub location: PathBuf,
    /// Display name of the language
    pub name: String,
    /// Author of the language data
    #[serde(default = "unknown")]
    pub author: String,
    /// Whether this language is enabled. Carried as metadata, not enforced.
    #[serde(default)]
    pub enabled: bool,
    /// Free-form notes about the language
    #[serde(default)]
    pub notes: String,
    /// Marks this entry's code as the registry default
    #[serde(default)]
    pub is_default: bool,
}

/// A parsed and validated manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Entries keyed by locale code, in manifest document order
    pub entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
    /// Parse and validate the manifest at `path`.
    ///
    /// Schema failures are collected across all entries and reported
    /// together in [`LangError::ManifestInvalid`], rather than aborting on
    /// the first bad entry.
    pub fn from_file(path: &Path) -> LangResult<Self> {
        if !path.exists() {
            return Err(LangError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path)?;
        let doc: serde_json::Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| LangError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = Vec::new();
        let mut errors = Vec::new();
        for (code, value) in doc {
            if code.starts_with("notes") {
                debug!("Skipping manifest comment entry `{}`", code);
                continue;
            }
            match serde_json::from_value::<ManifestEntry>(value) {
                Ok(entry) => entries.push((code, entry)),
                Err(e) => errors.push(EntryError {
                    code,
                    reason: e.to_string(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(Self { entries })
        } else {
            Err(LangError::ManifestInvalid { errors })
        }
    }
}
