//! Registry of loaded languages and locale resolution

use crate::error::{LangError, LangResult};
use crate::language::{Language, LoadWarning};
use crate::manifest::Manifest;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Built-in default locale code, in effect until a manifest entry flagged
/// `is_default` overrides it.
pub const DEFAULT_LOCALE: &str = "en_us";

/// Outcome of a successful bulk load: which locales were registered, which
/// code is the default, and every per-file warning hit along the way.
#[derive(Debug)]
pub struct LoadReport {
    /// Locale codes registered, in manifest document order
    pub loaded: Vec<String>,
    /// Default code in effect after the load
    pub default_code: String,
    /// Recoverable problems encountered while reading language data
    pub warnings: Vec<LoadWarning>,
}

/// Registry of all loaded [`Language`] instances, keyed by locale code.
///
/// Owned by the application's composition root and handed to whatever needs
/// locale resolution; tests get a fresh registry each.
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: HashMap<String, Language>,
    default_code: String,
}

impl LanguageRegistry {
    /// Create an empty registry with the built-in default locale code.
    pub fn new() -> Self {
        Self {
            languages: HashMap::new(),
            default_code: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Load every language listed in the manifest at `manifest_path`,
    /// replacing the registry's previous contents wholesale.
    ///
    /// The replacement is atomic with respect to failures: the new language
    /// map is built completely before being swapped in, so a manifest error
    /// leaves the previous registry untouched. When several entries are
    /// flagged `is_default`, the last one in manifest document order wins.
    pub fn load_languages<P: AsRef<Path>>(&mut self, manifest_path: P) -> LangResult<LoadReport> {
        let manifest_path = manifest_path.as_ref();
        info!("Loading languages from {:?}", manifest_path);

        let manifest = Manifest::from_file(manifest_path)?;

        let mut languages = HashMap::new();
        let mut default_code = self.default_code.clone();
        let mut loaded = Vec::new();
        let mut warnings = Vec::new();

        for (code, entry) in &manifest.entries {
            if entry.is_default {
                debug!("Setting default language to `{}`", code);
                default_code = code.clone();
            }
            let (language, mut language_warnings) = Language::load(entry, code);
            warnings.append(&mut language_warnings);
            loaded.push(code.clone());
            languages.insert(code.clone(), language);
        }

        self.languages = languages;
        self.default_code = default_code.clone();
        info!("Loaded languages: {:?}", loaded);

        Ok(LoadReport {
            loaded,
            default_code,
            warnings,
        })
    }

    /// Resolve `code` to a loaded language.
    ///
    /// An empty or absent code means the default locale. An unknown code
    /// falls back to the default locale's entry, then to an arbitrary
    /// loaded entry. Fails only when the registry is empty, which is a
    /// registry-not-loaded precondition violation rather than a normal
    /// runtime miss.
    pub fn get_language(&self, code: Option<&str>) -> LangResult<&Language> {
        let code = match code {
            Some(code) if !code.is_empty() => code,
            _ => &self.default_code,
        };
        if let Some(language) = self.languages.get(code) {
            return Ok(language);
        }
        self.languages
            .get(&self.default_code)
            .or_else(|| self.languages.values().next())
            .ok_or(LangError::NoLanguagesLoaded)
    }

    /// The language registered under the current default code, if any.
    pub fn default_language(&self) -> Option<&Language> {
        self.languages.get(&self.default_code)
    }

    /// Translate `key` for the given locale, falling back to the default
    /// locale for missing keys. `Ok(None)` means the key resolved nowhere.
    pub fn translate(
        &self,
        code: Option<&str>,
        key: &str,
        replacements: Option<&[(String, String)]>,
    ) -> LangResult<Option<String>> {
        let language = self.get_language(code)?;
        Ok(language.get(key, replacements, self.default_language()))
    }

    /// Translate `key`, returning the literal `default` when the resolved
    /// locale has no value for it. The default-locale fallback is bypassed.
    pub fn translate_or(
        &self,
        code: Option<&str>,
        key: &str,
        default: &str,
        replacements: Option<&[(String, String)]>,
    ) -> LangResult<String> {
        Ok(self.get_language(code)?.get_or(key, default, replacements))
    }

    /// Locale codes currently registered.
    pub fn loaded_codes(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// The locale code lookups fall back to.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Whether no language has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
