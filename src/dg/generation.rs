//! Combination generator
//!
//!     Expands keywords x titles x texts into advertisements. The order is
//!     keyword-major, then title, then text, so for keywords [a, b], titles [t1, t2]
//!     and texts [x1]:
//!
//!         (a, t1, x1) (a, t2, x1) (b, t1, x1) (b, t2, x1)
//!
//!     The product is produced lazily by [Combinations]; nothing is materialized. Each
//!     template is tokenized once up front and rendered per keyword.
//!
//!     With [GenerateOptions::skip_long] a record whose rendered title or text is
//!     longer than [LengthLimits] allows is dropped. Lengths are counted in characters
//!     (Unicode scalar values), not bytes.

use crate::dg::template::Template;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Maximum title length of the ad platform
pub const DEFAULT_TITLE_LIMIT: usize = 35;
/// Maximum text length of the ad platform
pub const DEFAULT_TEXT_LIMIT: usize = 75;

/// One generated advertisement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdRecord {
    pub keyword: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthLimits {
    pub title: usize,
    pub text: usize,
}

impl Default for LengthLimits {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_LIMIT,
            text: DEFAULT_TEXT_LIMIT,
        }
    }
}

impl LengthLimits {
    pub fn allows(&self, record: &AdRecord) -> bool {
        record.title.chars().count() <= self.title && record.text.chars().count() <= self.text
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Drop records that exceed `limits`
    pub skip_long: bool,
    pub limits: LengthLimits,
}

impl GenerateOptions {
    pub fn skip_long(limits: LengthLimits) -> Self {
        Self {
            skip_long: true,
            limits,
        }
    }
}

/// Size of a keywords x titles x texts product, saturating at `usize::MAX`
pub fn product_size(keywords: usize, titles: usize, texts: usize) -> usize {
    keywords.saturating_mul(titles).saturating_mul(texts)
}

/// Enumerate every (keyword, title, text) combination
pub fn generate<'a>(
    keywords: &'a [String],
    titles: &[String],
    texts: &[String],
    options: GenerateOptions,
) -> Combinations<'a> {
    Combinations {
        keywords,
        titles: titles.iter().map(|t| Template::parse(t)).collect(),
        texts: texts.iter().map(|t| Template::parse(t)).collect(),
        options,
        keyword: 0,
        title: 0,
        text: 0,
        rendered_title: None,
        skipped: 0,
    }
}

/// Lazy iterator over generated advertisements
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    keywords: &'a [String],
    titles: Vec<Template>,
    texts: Vec<Template>,
    options: GenerateOptions,
    keyword: usize,
    title: usize,
    text: usize,
    // Title rendered for the current (keyword, title) pair
    rendered_title: Option<String>,
    skipped: usize,
}

impl Combinations<'_> {
    /// Records dropped by length filtering so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Total size of the product, before filtering
    pub fn total(&self) -> usize {
        product_size(self.keywords.len(), self.titles.len(), self.texts.len())
    }

    fn position(&self) -> usize {
        product_size(self.keyword, self.titles.len(), self.texts.len())
            .saturating_add(self.title.saturating_mul(self.texts.len()))
            .saturating_add(self.text)
    }

    fn exhausted(&self) -> bool {
        self.titles.is_empty() || self.texts.is_empty() || self.keyword >= self.keywords.len()
    }

    fn advance(&mut self) {
        self.text += 1;
        if self.text == self.texts.len() {
            self.text = 0;
            self.title += 1;
            self.rendered_title = None;
            if self.title == self.titles.len() {
                self.title = 0;
                self.keyword += 1;
            }
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = AdRecord;

    fn next(&mut self) -> Option<AdRecord> {
        while !self.exhausted() {
            let keywords = self.keywords;
            let keyword = &keywords[self.keyword];
            let title = self
                .rendered_title
                .get_or_insert_with(|| self.titles[self.title].render(keyword))
                .clone();
            let record = AdRecord {
                keyword: keyword.clone(),
                title,
                text: self.texts[self.text].render(keyword),
            };
            self.advance();

            if self.options.skip_long && !self.options.limits.allows(&record) {
                trace!(title = %record.title, text = %record.text, "skipping long record");
                self.skipped += 1;
                continue;
            }
            return Some(record);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.exhausted() {
            0
        } else {
            self.total().saturating_sub(self.position())
        };
        if self.options.skip_long {
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}
