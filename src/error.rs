//! Error types for manifest loading and locale resolution

use std::path::PathBuf;
use thiserror::Error;

/// A single manifest entry that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    /// Locale code of the offending entry
    pub code: String,
    /// What is wrong with it
    pub reason: String,
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`: {}", self.code, self.reason)
    }
}

/// Errors that can occur while loading a manifest or resolving a language
#[derive(Error, Debug)]
pub enum LangError {
    /// The manifest file does not exist
    #[error("manifest `{path}` does not exist")]
    ManifestNotFound {
        /// Path the caller asked to load
        path: PathBuf,
    },

    /// The manifest file is not a valid JSON object
    #[error("failed to parse manifest `{path}`: {source}")]
    ManifestParse {
        /// Path of the unparseable manifest
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// One or more manifest entries failed schema validation
    #[error("invalid manifest entries: {}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    ManifestInvalid {
        /// Every entry that failed validation
        errors: Vec<EntryError>,
    },

    /// The registry has no languages to resolve against
    #[error("no languages loaded")]
    NoLanguagesLoaded,

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for language operations
pub type LangResult<T> = Result<T, LangError>;
