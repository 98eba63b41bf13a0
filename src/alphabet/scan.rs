//! Leftmost-longest symbol scanner.
//!
//! All renderings are compiled into one alternation ordered longest first.
//! The regex engine reports the leftmost match and, among alternatives that
//! start there, the first listed, which makes every match the longest symbol
//! available at that position.

use regex::{Regex, RegexBuilder};

/// A symbol found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMatch {
    /// Byte offset of the first byte of the match.
    pub start: usize,
    /// Byte offset one past the match.
    pub end: usize,
    /// Alphabet index of the matched symbol.
    pub index: usize,
}

#[derive(Debug)]
pub(crate) struct Scanner {
    regex: Regex,
}

impl Scanner {
    pub(crate) fn new<'a>(renderings: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        let mut renderings: Vec<&str> = renderings.into_iter().filter(|s| !s.is_empty()).collect();
        renderings.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        renderings.dedup();

        let pattern = renderings
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        // A full emoji table is a few thousand literals.
        let regex = RegexBuilder::new(&pattern)
            .size_limit(64 * (1 << 20))
            .dfa_size_limit(16 * (1 << 20))
            .build()?;
        Ok(Self { regex })
    }

    /// Byte spans of every match, left to right, non-overlapping.
    pub(crate) fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, usize)> + 't {
        self.regex.find_iter(text).map(|m| (m.start(), m.end()))
    }
}
