//! Locale string tables with default-locale fallback
//!
//! This crate loads translation tables from on-disk JSON sources, indexes
//! them by locale code, and serves key-based lookups with placeholder
//! substitution and fallback to a default locale. It includes:
//!
//! - A typed manifest describing where each locale's data lives
//! - Fail-soft loading of file-backed and directory-backed languages
//! - Two-level lookup fallback with memoized fallback results
//! - Structured load warnings callers can assert on
//!
//! # Example
//!
//! ```no_run
//! use langtable::{replacements, LanguageRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = LanguageRegistry::new();
//! let report = registry.load_languages("languages/language.json")?;
//! assert!(report.warnings.is_empty());
//!
//! let args = replacements!["name" => "Alice"];
//! let greeting = registry.translate(Some("en_us"), "common.greeting", args.as_deref())?;
//! println!("{greeting:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod language;
pub mod manifest;
pub mod registry;

pub use error::{EntryError, LangError, LangResult};
pub use language::{Language, LoadWarning};
pub use manifest::{Manifest, ManifestEntry};
pub use registry::{LanguageRegistry, LoadReport, DEFAULT_LOCALE};
