//! Keyword substitution into title and text templates
//!
//!     A template is a line of text with zero or more placeholders. Each placeholder
//!     is replaced by the current keyword; the case of the placeholder decides how:
//!
//!         [k], [key]    keyword inserted as written
//!         [K], [Key]    keyword inserted with its first character upper-cased
//!
//!     Every other bracketed text is literal, so "[скидка]" stays "[скидка]". All
//!     placeholders of one template receive the same keyword.
//!
//!     Templates are tokenized once by a logos lexer into literal and placeholder
//!     segments, then rendered once per keyword. The generator relies on this: a
//!     title is parsed once and rendered |keywords| times.

use logos::Logos;

/// Tokens of a template line
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum TemplateToken {
    #[token("[k]")]
    #[token("[key]")]
    Keyword,

    #[token("[K]")]
    #[token("[Key]")]
    CapitalizedKeyword,

    // A bracket that does not open a placeholder
    #[token("[")]
    OpenBracket,

    #[regex(r"[^\[]+")]
    Text,
}

/// How a placeholder inserts the keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCase {
    AsIs,
    Capitalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Keyword(KeywordCase),
}

/// A tokenized template, ready to be rendered for any keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut lexer = TemplateToken::lexer(source);

        while let Some(token) = lexer.next() {
            let segment = match token {
                Ok(TemplateToken::Keyword) => Segment::Keyword(KeywordCase::AsIs),
                Ok(TemplateToken::CapitalizedKeyword) => Segment::Keyword(KeywordCase::Capitalized),
                // Plain text, stray brackets and anything the lexer rejects are kept verbatim
                Ok(TemplateToken::OpenBracket) | Ok(TemplateToken::Text) | Err(_) => {
                    Segment::Literal(lexer.slice().to_string())
                }
            };

            match (segments.last_mut(), segment) {
                (Some(Segment::Literal(previous)), Segment::Literal(text)) => {
                    previous.push_str(&text)
                }
                (_, segment) => segments.push(segment),
            }
        }

        Template { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether rendering depends on the keyword at all
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Keyword(_)))
    }

    /// Produce the concrete string for `keyword`
    pub fn render(&self, keyword: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Keyword(KeywordCase::AsIs) => out.push_str(keyword),
                Segment::Keyword(KeywordCase::Capitalized) => {
                    out.push_str(&capitalize_first(keyword))
                }
            }
        }
        out
    }
}

/// Substitute `keyword` into every placeholder of `template`
pub fn substitute(template: &str, keyword: &str) -> String {
    Template::parse(template).render(keyword)
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
