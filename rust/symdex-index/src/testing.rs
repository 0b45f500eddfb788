//! Decomposers used by the unit tests of this crate.

use symdex_common::Result;

use crate::decomposer::{Decomposer, QualifiedFrequencies};

/// Whitespace-separated qualified symbols, split on `_` into composites
/// (empty parts dropped); composites are their own single atomic; roots are
/// lower-cased.
pub(crate) struct SplitDecomposer;

impl Decomposer for SplitDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        let mut frequencies = QualifiedFrequencies::new();
        for word in text.split_whitespace() {
            *frequencies.entry(word.to_owned()).or_insert(0) += 1;
        }
        Ok(frequencies)
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

/// [`SplitDecomposer`] that reports every distinct word with the same fixed
/// occurrence count.
pub(crate) struct FixedCountDecomposer(pub u64);

impl Decomposer for FixedCountDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        Ok(text
            .split_whitespace()
            .map(|word| (word.to_owned(), self.0))
            .collect())
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        SplitDecomposer.qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        SplitDecomposer.composite_to_atomic(composite)
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        SplitDecomposer.atomic_to_root(atomic)
    }
}
