//! Property-based tests for parsing and generation
//!
//! These tests check the invariants that must hold for every well-formed .dg file:
//! content is partitioned in order, markers and blank lines never leak into content,
//! and the generated product has the expected size and respects length limits.

use dg::dg::section::Section;
use dg::dg::{generate, substitute, DgParser, GenerateOptions, LengthLimits};
use proptest::prelude::*;

/// A trimmed, non-empty content line without brackets
fn content_line() -> impl Strategy<Value = String> {
    "[a-zа-яё0-9]{1,8}( [a-zа-яё0-9!,.]{1,8}){0,3}"
}

/// A title/text template with optional placeholders
fn template_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zа-я]{1,6}",
            Just("[k]".to_string()),
            Just("[K]".to_string()),
        ],
        1..5,
    )
    .prop_map(|parts| parts.join(" "))
}

fn blank_line() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("   ".to_string()), Just("\t".to_string())]
}

/// Render a section with blank lines and surrounding whitespace sprinkled in
fn render_section(section: Section, lines: &[String], blanks: &[String]) -> String {
    let mut out = format!("  {}  \n", section.marker());
    for (i, line) in lines.iter().enumerate() {
        if let Some(blank) = blanks.get(i) {
            out.push_str(blank);
            out.push('\n');
        }
        out.push_str(&format!("\t{line} \n"));
    }
    out
}

proptest! {
    #[test]
    fn test_parse_partitions_content_in_order(
        preamble in prop::collection::vec(content_line(), 0..3),
        keywords in prop::collection::vec(content_line(), 0..6),
        titles in prop::collection::vec(template_line(), 0..6),
        texts in prop::collection::vec(template_line(), 0..6),
        blanks in prop::collection::vec(blank_line(), 0..6),
    ) {
        let mut source = preamble.join("\n");
        source.push('\n');
        source.push_str(&render_section(Section::Keywords, &keywords, &blanks));
        source.push_str(&render_section(Section::Titles, &titles, &blanks));
        source.push_str(&render_section(Section::Texts, &texts, &blanks));

        let doc = DgParser::new().parse_str(&source).unwrap();
        prop_assert_eq!(&doc.keywords, &keywords);
        prop_assert_eq!(&doc.titles, &titles);
        prop_assert_eq!(&doc.texts, &texts);

        for line in doc.keywords.iter().chain(&doc.titles).chain(&doc.texts) {
            prop_assert!(!line.trim().is_empty());
            prop_assert!(Section::from_marker(line).is_none());
        }
    }

    #[test]
    fn test_product_size(
        keywords in prop::collection::vec(content_line(), 0..5),
        titles in prop::collection::vec(template_line(), 0..5),
        texts in prop::collection::vec(template_line(), 0..5),
    ) {
        let count = generate(&keywords, &titles, &texts, GenerateOptions::default()).count();
        prop_assert_eq!(count, keywords.len() * titles.len() * texts.len());
    }

    #[test]
    fn test_skip_long_only_removes_long_records(
        keywords in prop::collection::vec(content_line(), 1..5),
        titles in prop::collection::vec(template_line(), 1..5),
        texts in prop::collection::vec(template_line(), 1..5),
        title_limit in 1usize..40,
        text_limit in 1usize..40,
    ) {
        let limits = LengthLimits { title: title_limit, text: text_limit };
        let all: Vec<_> = generate(&keywords, &titles, &texts, GenerateOptions::default()).collect();
        let mut filtered = generate(&keywords, &titles, &texts, GenerateOptions::skip_long(limits));
        let kept: Vec<_> = filtered.by_ref().collect();

        prop_assert!(kept.len() <= all.len());
        prop_assert_eq!(kept.len() + filtered.skipped(), all.len());
        for record in &kept {
            prop_assert!(limits.allows(record));
        }
        let expected: Vec<_> = all.into_iter().filter(|r| limits.allows(r)).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn test_substitution_without_markers_is_identity(
        template in "[a-zа-я ,.!?%0-9]{0,30}",
        keyword in content_line(),
    ) {
        prop_assert_eq!(substitute(&template, &keyword), template);
    }

    #[test]
    fn test_marker_casing(keyword in "[a-zа-яё][a-zа-яё ]{0,10}") {
        let capitalized = substitute("[K]", &keyword);
        let first = capitalized.chars().next().unwrap();
        prop_assert!(first.is_uppercase());
        prop_assert_eq!(substitute("[k]", &keyword), keyword);
    }
}
