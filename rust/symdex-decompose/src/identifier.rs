//! Decomposition of source text into qualified identifiers.

use std::collections::BTreeMap;

use symdex_common::Result;
use symdex_index::{Decomposer, QualifiedFrequencies};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    config::IdentifierDecomposerConfig,
    split::{bounded, split_on, split_words},
};

/// Decomposes source text along the identifier chain:
///
/// - text: the qualified identifiers found between Unicode word boundaries,
///   where words joined by a qualification separator form one identifier
///   (`std::io::Read`, `os.path`, `max_symbol_length`);
/// - qualified → composite: split on the qualification separators;
/// - composite → atomic: split at camelCase and letter/digit transitions;
/// - atomic → root: lower-cased.
#[derive(Debug, Clone, Default)]
pub struct IdentifierDecomposer {
    config: IdentifierDecomposerConfig,
}

impl IdentifierDecomposer {
    pub fn new(config: IdentifierDecomposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(IdentifierDecomposer { config })
    }

    pub fn config(&self) -> &IdentifierDecomposerConfig {
        &self.config
    }

    /// The qualified identifiers of `text` in order of appearance.
    pub fn identifiers<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut identifiers = Vec::new();
        // Byte range of the identifier being extended.
        let mut current: Option<(usize, usize)> = None;
        // Start of the non-word run following the current identifier.
        let mut gap: Option<usize> = None;

        for (pos, piece) in pieces(text) {
            let end = pos + piece.len();
            if piece.chars().any(char::is_alphanumeric) {
                match (current, gap) {
                    (Some((start, _)), Some(gap_start))
                        if self.is_separator(&text[gap_start..pos]) =>
                    {
                        current = Some((start, end));
                    }
                    (Some((start, _)), None) => current = Some((start, end)),
                    _ => {
                        self.emit(text, current, &mut identifiers);
                        current = Some((pos, end));
                    }
                }
                gap = None;
            } else if current.is_some() {
                let gap_start = *gap.get_or_insert(pos);
                if !self.is_separator_prefix(&text[gap_start..end]) {
                    self.emit(text, current.take(), &mut identifiers);
                    gap = None;
                }
            }
        }
        self.emit(text, current, &mut identifiers);
        identifiers
    }

    fn emit<'a>(&self, text: &'a str, range: Option<(usize, usize)>, out: &mut Vec<&'a str>) {
        if let Some((start, end)) = range {
            let identifier = text[start..end].trim_matches(|c: char| !c.is_alphanumeric());
            if let Some(identifier) = self.bounded(identifier) {
                out.push(identifier);
            }
        }
    }

    fn is_separator(&self, s: &str) -> bool {
        self.config.qualified_separators.iter().any(|sep| sep == s)
    }

    fn is_separator_prefix(&self, s: &str) -> bool {
        self.config
            .qualified_separators
            .iter()
            .any(|sep| sep.starts_with(s))
    }

    fn bounded<'a>(&self, symbol: &'a str) -> Option<&'a str> {
        bounded(
            symbol,
            self.config.min_symbol_length,
            self.config.max_symbol_length,
        )
    }

    /// Keeps the bounded parts; a symbol whose parts are all dropped stands
    /// for itself.
    fn parts_or_self(&self, symbol: &str, parts: Vec<&str>) -> Vec<String> {
        let parts: Vec<String> = parts
            .into_iter()
            .filter_map(|part| self.bounded(part))
            .map(str::to_owned)
            .collect();
        if parts.is_empty() {
            vec![symbol.to_owned()]
        } else {
            parts
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `text` at Unicode word boundaries, then splits each segment into
/// alternating runs of word and non-word characters, so that word-internal
/// punctuation such as the `:` in `a:b` is seen as a gap.
fn pieces(text: &str) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    for (pos, segment) in text.split_word_bound_indices() {
        let mut start = 0;
        let mut previous: Option<bool> = None;
        for (i, c) in segment.char_indices() {
            let word = is_word_char(c);
            if previous.is_some_and(|p| p != word) {
                pieces.push((pos + start, &segment[start..i]));
                start = i;
            }
            previous = Some(word);
        }
        if segment.len() > start {
            pieces.push((pos + start, &segment[start..]));
        }
    }
    pieces
}

impl Decomposer for IdentifierDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        let mut frequencies = BTreeMap::new();
        for identifier in self.identifiers(text) {
            *frequencies.entry(identifier.to_owned()).or_insert(0) += 1;
        }
        Ok(frequencies)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        let parts = split_on(qualified, &self.config.qualified_separators);
        Ok(self.parts_or_self(qualified, parts))
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        let parts = split_words(
            composite,
            self.config.split_camel_case,
            self.config.split_digits,
        );
        Ok(self.parts_or_self(composite, parts))
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        Ok(if self.config.lowercase_roots {
            atomic.to_lowercase()
        } else {
            atomic.to_owned()
        })
    }
}
