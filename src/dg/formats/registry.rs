//! Format registry for advertisement output
//!
//! This module provides a pluggable registry of output formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::dg::generation::AdRecord;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The sink rejected a write
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for advertisement formatters
///
/// Implementors stream records into a sink, one at a time, and return how many
/// records were written.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "csv", "jsonl")
    fn name(&self) -> &str;

    /// Write every record produced by `records` to `sink`
    fn write_records(
        &self,
        records: &mut dyn Iterator<Item = AdRecord>,
        sink: &mut dyn Write,
    ) -> Result<usize, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of advertisement formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::DelimitedFormatter::csv());
        registry.register(super::DelimitedFormatter::tsv());
        registry.register(super::JsonLinesFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Pick a format name from the output file extension
///
/// `.csv` is comma-delimited and `.json`/`.jsonl` is JSON lines; every other
/// extension (or none) falls back to `fallback`. Extensions match case-sensitively,
/// so `ads.CSV` uses the fallback.
pub fn format_name_for_path<'a>(path: &Path, fallback: &'a str) -> &'a str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => "csv",
        Some("tsv") => "tsv",
        Some("json") | Some("jsonl") => "jsonl",
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test formatter
    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn write_records(
            &self,
            records: &mut dyn Iterator<Item = AdRecord>,
            sink: &mut dyn Write,
        ) -> Result<usize, FormatError> {
            let count = records.count();
            write!(sink, "{count} records")?;
            Ok(count)
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    fn record(title: &str) -> AdRecord {
        AdRecord {
            keyword: "k".to_string(),
            title: title.to_string(),
            text: "text".to_string(),
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formatters.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.get("test").is_some());
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        let formatter = registry.get("test");
        assert!(formatter.is_some());
        assert_eq!(formatter.unwrap().description(), "Test formatter");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registered_formatter_streams_records() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        let mut out: Vec<u8> = Vec::new();
        let mut records = vec![record("a"), record("b")].into_iter();
        let written = registry
            .get("test")
            .unwrap()
            .write_records(&mut records, &mut out)
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "2 records");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["csv", "jsonl", "tsv"]);
    }

    #[test]
    fn test_format_name_for_path() {
        assert_eq!(format_name_for_path(Path::new("out/ads.csv"), "tsv"), "csv");
        assert_eq!(format_name_for_path(Path::new("ads.dg.csv"), "tsv"), "csv");
        assert_eq!(format_name_for_path(Path::new("ads.jsonl"), "tsv"), "jsonl");
        assert_eq!(format_name_for_path(Path::new("ads.json"), "tsv"), "jsonl");
        assert_eq!(format_name_for_path(Path::new("ads.txt"), "tsv"), "tsv");
        assert_eq!(format_name_for_path(Path::new("ads"), "csv"), "csv");
    }

    #[test]
    fn test_format_name_for_path_is_case_sensitive() {
        assert_eq!(format_name_for_path(Path::new("ads.CSV"), "tsv"), "tsv");
        assert_eq!(format_name_for_path(Path::new("ads.Json"), "tsv"), "tsv");
    }
}
