//! A single loaded locale: data loading, key lookup, and fallback caching

use crate::manifest::ManifestEntry;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A recoverable problem encountered while loading a language's data.
///
/// Warnings are returned as values rather than only logged, so callers can
/// assert on which files were skipped and why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A non-JSON file was found in a language directory and skipped
    #[error("skipping non-json file `{path}` in language directory")]
    NotJson {
        /// Path of the skipped file
        path: PathBuf,
    },

    /// A file could not be read or parsed as JSON and was skipped
    #[error("failed to load language file `{path}`: {reason}")]
    ParseFailed {
        /// Path of the skipped file
        path: PathBuf,
        /// Underlying read or parse failure
        reason: String,
    },

    /// The declared source location does not exist
    #[error("language source `{location}` for code `{code}` does not exist")]
    MissingSource {
        /// Location declared in the manifest
        location: PathBuf,
        /// Locale code the source belongs to
        code: String,
    },

    /// A language directory contained no usable JSON files
    #[error("no language json files found in directory `{location}` for code `{code}`")]
    EmptySource {
        /// Location declared in the manifest
        location: PathBuf,
        /// Locale code the source belongs to
        code: String,
    },
}

/// Build the optional replacement list for [`Language::get`] from
/// `"placeholder" => value` pairs. Values are stringified with `ToString`.
#[macro_export]
macro_rules! replacements {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        Some(vec![$(($key.to_string(), $value.to_string())),+])
    };
}

/// One loaded locale and its key-to-string translation table.
#[derive(Debug)]
pub struct Language {
    name: String,
    author: String,
    enabled: bool,
    notes: String,
    location: PathBuf,
    locale_code: String,
    /// `None` when no loadable source was found at `location`.
    data: Option<HashMap<String, String>>,
    /// Memoized results of successful default-locale fallbacks. Kept apart
    /// from `data` so the loaded table stays exactly the union of the JSON
    /// fragments on disk, and so the cache can be reset on its own.
    fallback_cache: RwLock<HashMap<String, String>>,
}

impl Language {
    /// Load a language from its manifest entry.
    ///
    /// Loading is one-shot, synchronous, and fail-soft: individual bad
    /// files are skipped and reported as warnings; only total absence of
    /// loadable data leaves the language without a table, in which case
    /// every lookup falls through to the default locale.
    pub fn load(entry: &ManifestEntry, locale_code: &str) -> (Self, Vec<LoadWarning>) {
        let mut warnings = Vec::new();
        let data = read_data(&entry.location, locale_code, &mut warnings);
        let language = Self {
            name: entry.name.clone(),
            author: entry.author.clone(),
            enabled: entry.enabled,
            notes: entry.notes.clone(),
            location: entry.location.clone(),
            locale_code: locale_code.to_string(),
            data,
            fallback_cache: RwLock::new(HashMap::new()),
        };
        (language, warnings)
    }

    /// Look up the translated string for `key`.
    ///
    /// When this language has no usable value (missing, or stored as an
    /// empty string), the lookup consults `fallback` — the default-locale
    /// language — and memoizes a successful result so later lookups stay
    /// local. A language never recurses into itself when it is its own
    /// fallback.
    ///
    /// `replacements` substitutes literal `{name}` occurrences in the
    /// resolved string, in slice order. Substituted text is not re-scanned,
    /// so a replacement value containing a placeholder pattern can itself
    /// be rewritten by a later pair.
    pub fn get(
        &self,
        key: &str,
        replacements: Option<&[(String, String)]>,
        fallback: Option<&Language>,
    ) -> Option<String> {
        let got = match self.lookup_local(key) {
            Some(value) => value,
            None => {
                let fb = fallback?;
                if std::ptr::eq(self, fb) {
                    return None;
                }
                // Raw lookup: the default locale has no further fallback,
                // and replacements are applied per call, not cached.
                let value = fb.get(key, None, None)?;
                debug!(
                    "Key `{}` resolved for `{}` via default locale `{}`",
                    key, self.locale_code, fb.locale_code
                );
                self.fallback_cache
                    .write()
                    .unwrap()
                    .insert(key.to_string(), value.clone());
                value
            }
        };
        Some(substitute(&got, replacements))
    }

    /// Look up `key`, returning the literal `default` on a miss.
    ///
    /// The default-locale fallback is never consulted; `replacements` are
    /// applied to whichever string is returned, the default included.
    pub fn get_or(
        &self,
        key: &str,
        default: &str,
        replacements: Option<&[(String, String)]>,
    ) -> String {
        let got = self
            .lookup_local(key)
            .unwrap_or_else(|| default.to_string());
        substitute(&got, replacements)
    }

    /// Drop all memoized fallback results, so the next miss consults the
    /// default locale again.
    pub fn clear_fallback_cache(&self) {
        self.fallback_cache.write().unwrap().clear();
    }

    fn lookup_local(&self, key: &str) -> Option<String> {
        if let Some(value) = self.data.as_ref().and_then(|data| data.get(key)) {
            if !value.is_empty() {
                return Some(value.clone());
            }
        }
        self.fallback_cache.read().unwrap().get(key).cloned()
    }

    /// Display name of the language
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author of the language data
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Whether the language is flagged as enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Free-form notes about the language
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Filesystem location the data was loaded from
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Locale code this language was registered under
    pub fn locale_code(&self) -> &str {
        &self.locale_code
    }

    /// Whether any data table was loaded for this language
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

fn read_data(
    location: &Path,
    code: &str,
    warnings: &mut Vec<LoadWarning>,
) -> Option<HashMap<String, String>> {
    if location.is_dir() {
        read_directory(location, code, warnings)
    } else {
        read_file(location, code, warnings)
    }
}

/// Aggregate every `.json` file in the directory into one table, in
/// lexicographic filename order; later files overwrite earlier keys.
fn read_directory(
    location: &Path,
    code: &str,
    warnings: &mut Vec<LoadWarning>,
) -> Option<HashMap<String, String>> {
    let entries = match fs::read_dir(location) {
        Ok(entries) => entries,
        Err(_) => {
            push_warning(
                warnings,
                LoadWarning::MissingSource {
                    location: location.to_path_buf(),
                    code: code.to_string(),
                },
            );
            return None;
        }
    };
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    let mut aggregated = HashMap::new();
    let mut processed = 0_usize;
    for path in paths {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !file_name.ends_with(".json") {
            push_warning(warnings, LoadWarning::NotJson { path });
            continue;
        }
        let doc = match parse_json_file(&path) {
            Ok(doc) => doc,
            Err(reason) => {
                push_warning(warnings, LoadWarning::ParseFailed { path, reason });
                continue;
            }
        };
        merge_data(&doc, &mut aggregated);
        processed += 1;
    }

    if processed == 0 {
        push_warning(
            warnings,
            LoadWarning::EmptySource {
                location: location.to_path_buf(),
                code: code.to_string(),
            },
        );
        return None;
    }
    info!("Loaded language `{}` from directory {:?}", code, location);
    Some(aggregated)
}

fn read_file(
    path: &Path,
    code: &str,
    warnings: &mut Vec<LoadWarning>,
) -> Option<HashMap<String, String>> {
    if !path.exists() {
        push_warning(
            warnings,
            LoadWarning::MissingSource {
                location: path.to_path_buf(),
                code: code.to_string(),
            },
        );
        return None;
    }
    let doc = match parse_json_file(path) {
        Ok(doc) => doc,
        Err(reason) => {
            push_warning(
                warnings,
                LoadWarning::ParseFailed {
                    path: path.to_path_buf(),
                    reason,
                },
            );
            return None;
        }
    };
    let mut data = HashMap::new();
    merge_data(&doc, &mut data);
    info!("Loaded language `{}` from file {:?}", code, path);
    Some(data)
}

fn parse_json_file(path: &Path) -> Result<Value, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

/// Merge the document's `"data"` object into `table`. A missing or
/// non-object `"data"` key contributes nothing; non-string values are
/// dropped since they can never be returned from a lookup.
fn merge_data(doc: &Value, table: &mut HashMap<String, String>) {
    if let Some(Value::Object(map)) = doc.get("data") {
        for (key, value) in map {
            if let Value::String(s) = value {
                table.insert(key.clone(), s.clone());
            }
        }
    }
}

fn push_warning(warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}

fn substitute(value: &str, replacements: Option<&[(String, String)]>) -> String {
    let Some(replacements) = replacements else {
        return value.to_string();
    };
    let mut out = value.to_string();
    for (name, replacement) in replacements {
        out = out.replace(&format!("{{{name}}}"), replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_follows_slice_order() {
        let result = substitute(
            "Hello {name}, you have {count} messages",
            replacements!["name" => "Alice", "count" => 5].as_deref(),
        );
        assert_eq!(result, "Hello Alice, you have 5 messages");
    }

    #[test]
    fn later_pairs_rewrite_substituted_text() {
        // A value injecting a later placeholder pattern is rewritten by the
        // later pair. Accepted behavior, pinned here.
        let result = substitute(
            "{a} and {b}",
            replacements!["a" => "{b}", "b" => "beta"].as_deref(),
        );
        assert_eq!(result, "beta and beta");
    }

    #[test]
    fn empty_replacements_macro_is_none() {
        let none: Option<Vec<(String, String)>> = replacements![];
        assert!(none.is_none());
    }
}
