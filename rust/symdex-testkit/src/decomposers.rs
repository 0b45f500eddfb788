//! Decomposers with trivially predictable output.

use std::{cell::RefCell, collections::BTreeMap};

use symdex_common::Result;
use symdex_index::{Decomposer, Level, QualifiedFrequencies};

fn count_words(text: &str) -> QualifiedFrequencies {
    let mut frequencies = QualifiedFrequencies::new();
    for word in text.split_whitespace() {
        *frequencies.entry(word.to_owned()).or_insert(0) += 1;
    }
    frequencies
}

/// Whitespace-separated words are qualified symbols, split on `_` into
/// composite symbols; a composite symbol is its own single atomic symbol and
/// its root is the lower-cased atomic symbol.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitDecomposer;

impl Decomposer for SplitDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        Ok(count_words(text))
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        Ok(qualified
            .split('_')
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        Ok(vec![composite.to_owned()])
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        Ok(atomic.to_lowercase())
    }
}

/// Like [`SplitDecomposer`], but a composite symbol decomposes into its
/// characters, so repeated atomic symbols are common.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharDecomposer;

impl Decomposer for CharDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        Ok(count_words(text))
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        SplitDecomposer.qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        Ok(composite.chars().map(String::from).collect())
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        Ok(atomic.to_lowercase())
    }
}

/// Wraps a decomposer and records every call per level and argument.
pub struct CountingDecomposer<D> {
    inner: D,
    calls: RefCell<BTreeMap<(Level, String), usize>>,
}

impl<D: Decomposer> CountingDecomposer<D> {
    pub fn new(inner: D) -> Self {
        CountingDecomposer {
            inner,
            calls: RefCell::new(BTreeMap::new()),
        }
    }

    /// Number of calls that decomposed `symbol` at `level`.
    pub fn calls_for(&self, level: Level, symbol: &str) -> usize {
        self.calls
            .borrow()
            .get(&(level, symbol.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// Total calls that decomposed symbols at `level`.
    pub fn total_calls(&self, level: Level) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|((l, _), _)| *l == level)
            .map(|(_, n)| n)
            .sum()
    }

    /// Distinct symbols decomposed at `level`.
    pub fn distinct_calls(&self, level: Level) -> usize {
        self.calls
            .borrow()
            .keys()
            .filter(|(l, _)| *l == level)
            .count()
    }

    /// The largest number of calls made for any single symbol below `T`.
    ///
    /// Text calls are excluded: two texts may have identical content.
    pub fn max_calls_per_symbol(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|((level, _), _)| *level != Level::Text)
            .map(|(_, n)| *n)
            .max()
            .unwrap_or(0)
    }

    fn record(&self, level: Level, symbol: &str) {
        *self
            .calls
            .borrow_mut()
            .entry((level, symbol.to_owned()))
            .or_insert(0) += 1;
    }
}

impl<D: Decomposer> Decomposer for CountingDecomposer<D> {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        self.record(Level::Text, text);
        self.inner.text_to_qualified_frequencies(text)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        self.record(Level::Qualified, qualified);
        self.inner.qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        self.record(Level::Composite, composite);
        self.inner.composite_to_atomic(composite)
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        self.record(Level::Atomic, atomic);
        self.inner.atomic_to_root(atomic)
    }
}
