//! Section markers of the .dg format
//!
//!     A .dg file is split into three sections by marker lines. A marker must be the
//!     whole line (surrounding whitespace is ignored) and is matched case-sensitively:
//!
//!         [Ключи]       keywords, one per line
//!         [Заголовки]   title templates
//!         [Тексты]      text templates
//!
//!     Anything else is content. Whether a bracketed line that is not one of these
//!     markers is content or an error is decided by the parser (see
//!     [ParseOptions](crate::dg::parsing::ParseOptions)); this module only answers
//!     "which section does this marker open" and "does this line look like a marker".

use crate::dg::template::Template;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const MARKER_KEYWORDS: &str = "[Ключи]";
pub const MARKER_TITLES: &str = "[Заголовки]";
pub const MARKER_TEXTS: &str = "[Тексты]";

/// A whole line wrapped in a single pair of brackets
static HEADER_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[^\[\]]+\]$").unwrap());

/// The three content categories of a .dg file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Keywords,
    Titles,
    Texts,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Keywords, Section::Titles, Section::Texts];

    /// Map a trimmed line to the section it opens, if it is a known marker
    pub fn from_marker(line: &str) -> Option<Section> {
        match line {
            MARKER_KEYWORDS => Some(Section::Keywords),
            MARKER_TITLES => Some(Section::Titles),
            MARKER_TEXTS => Some(Section::Texts),
            _ => None,
        }
    }

    /// The literal marker line for this section
    pub fn marker(&self) -> &'static str {
        match self {
            Section::Keywords => MARKER_KEYWORDS,
            Section::Titles => MARKER_TITLES,
            Section::Texts => MARKER_TEXTS,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Keywords => "keywords",
            Section::Titles => "titles",
            Section::Texts => "texts",
        };
        write!(f, "{name}")
    }
}

/// Check whether a trimmed line has the shape of a section header.
///
/// A line that consists solely of a placeholder (`[k]`, `[K]`, ...) is a valid
/// one-word template and never counts as a header.
pub fn looks_like_marker(line: &str) -> bool {
    HEADER_LIKE.is_match(line) && !Template::parse(line).has_placeholders()
}
