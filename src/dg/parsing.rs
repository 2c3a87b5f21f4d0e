//! Parser for .dg files
//!
//!     A .dg file is read line by line, top to bottom:
//!
//!         [Ключи]
//!         обувь
//!         сапоги
//!
//!         [Заголовки]
//!         [K] недорого
//!
//!         [Тексты]
//!         Купи [k] сейчас
//!
//!     Each line is trimmed. Blank lines are skipped. A marker line switches the active
//!     section and is never stored. Any other line is appended to the active section,
//!     or dropped if no marker has been seen yet. Sections may appear in any order and
//!     more than once; content keeps file order within each section.
//!
//!     Unknown bracketed headers ("[Заголовок]") are content by default. With
//!     [ParseOptions::strict_markers] they abort the parse with
//!     [DgError::MalformedSection] instead.
//!
//!     The accumulation state lives in a builder scoped to a single parse call, so a
//!     [DgParser] can be reused across files.

use crate::dg::error::DgError;
use crate::dg::generation::{generate, product_size, Combinations, GenerateOptions};
use crate::dg::section::{looks_like_marker, Section};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject bracketed header lines that are not known section markers
    pub strict_markers: bool,
}

/// The three sequences extracted from a .dg file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DgDocument {
    pub keywords: Vec<String>,
    pub titles: Vec<String>,
    pub texts: Vec<String>,
}

impl DgDocument {
    /// Number of advertisements the document expands to before any filtering
    pub fn combination_count(&self) -> usize {
        product_size(self.keywords.len(), self.titles.len(), self.texts.len())
    }

    /// Lazily enumerate the advertisements of this document
    pub fn combinations(&self, options: GenerateOptions) -> Combinations<'_> {
        generate(&self.keywords, &self.titles, &self.texts, options)
    }
}

/// Parser for .dg files
#[derive(Debug, Clone, Copy, Default)]
pub struct DgParser {
    options: ParseOptions,
}

impl DgParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse the file at `path`
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<DgDocument, DgError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DgError::from_input(path, e))?;
        debug!(path = %path.display(), "parsing .dg file");

        let mut builder = DocumentBuilder::new(self.options);
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| DgError::from_input(path, e))?;
            builder.push_line(index + 1, &line)?;
        }
        Ok(builder.finish())
    }

    /// Parse .dg content from any buffered reader
    ///
    /// Read failures are reported against the pseudo-path `<reader>`.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<DgDocument, DgError> {
        let mut builder = DocumentBuilder::new(self.options);
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DgError::from_input("<reader>", e))?;
            builder.push_line(index + 1, &line)?;
        }
        Ok(builder.finish())
    }

    /// Parse .dg content held in memory
    pub fn parse_str(&self, source: &str) -> Result<DgDocument, DgError> {
        let mut builder = DocumentBuilder::new(self.options);
        for (index, line) in source.lines().enumerate() {
            builder.push_line(index + 1, line)?;
        }
        Ok(builder.finish())
    }
}

/// Accumulates one parse; never outlives the call that created it
struct DocumentBuilder {
    options: ParseOptions,
    active: Option<Section>,
    document: DgDocument,
}

impl DocumentBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            active: None,
            document: DgDocument::default(),
        }
    }

    fn push_line(&mut self, line_number: usize, raw: &str) -> Result<(), DgError> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(());
        }

        if let Some(section) = Section::from_marker(text) {
            debug!(line = line_number, %section, "entering section");
            self.active = Some(section);
            return Ok(());
        }

        if self.options.strict_markers && looks_like_marker(text) {
            return Err(DgError::MalformedSection {
                line: line_number,
                marker: text.to_string(),
            });
        }

        let Some(section) = self.active else {
            debug!(line = line_number, "dropping content before first section marker");
            return Ok(());
        };

        let target = match section {
            Section::Keywords => &mut self.document.keywords,
            Section::Titles => &mut self.document.titles,
            Section::Texts => &mut self.document.texts,
        };
        target.push(text.to_string());
        Ok(())
    }

    fn finish(self) -> DgDocument {
        debug!(
            keywords = self.document.keywords.len(),
            titles = self.document.titles.len(),
            texts = self.document.texts.len(),
            "parsed .dg document"
        );
        self.document
    }
}
