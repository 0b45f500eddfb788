//! Frequency aggregation over the index.
//!
//! Frequencies are computed at the Q level for a subset of texts and then
//! pushed forward one level at a time along the decomposition relation. The
//! pushforward adds a symbol's count to each of its children once per
//! occurrence in the child list, so totals grow with fan-out: a lower level
//! can have a larger total than the level above it.

mod cloud;
mod containers;

use std::collections::BTreeSet;

use symdex_collections::count_map::{CountMap, CountMapExt};
use symdex_common::{Result, error::Error};

use crate::{index::SymbolIndex, level::Level, symbol_table::SymbolId};

pub use cloud::{CloudRenderer, CloudTag, WeightedCloud};
pub use containers::ContainerTree;

/// Symbol id -> aggregated count.
pub type FrequencyMap = CountMap;

/// The texts a query aggregates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSubset {
    /// The whole corpus.
    All,
    /// A single text.
    One(SymbolId),
    /// A set of texts; their counts are summed.
    Many(BTreeSet<SymbolId>),
}

impl TextSubset {
    pub fn many(ids: impl IntoIterator<Item = SymbolId>) -> TextSubset {
        TextSubset::Many(ids.into_iter().collect())
    }
}

impl SymbolIndex {
    /// Resolves text names into a subset.
    pub fn text_subset<S: AsRef<str>>(&self, names: &[S]) -> Result<TextSubset> {
        let ids = names
            .iter()
            .map(|name| self.symbol_id(name.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(TextSubset::Many(ids))
    }

    /// Frequencies of the symbols at `target` over the texts of `subset`.
    ///
    /// `target` must be one of `Q`, `C`, `A` or `R`.
    pub fn frequencies(&self, subset: &TextSubset, target: Level) -> Result<FrequencyMap> {
        if target == Level::Text {
            return Err(Error::invalid_aggregation_target(target.letter()));
        }

        let mut frequencies = self.qualified_frequencies(subset)?;
        for level in Level::slice(Level::Qualified, target) {
            if level == target {
                break;
            }
            frequencies = self.pushforward(&frequencies, level)?;
        }
        Ok(frequencies)
    }

    /// Number of distinct symbols at `target` that occur in `subset`.
    pub fn symbol_count(&self, subset: &TextSubset, target: Level) -> Result<usize> {
        Ok(self.frequencies(subset, target)?.len())
    }

    /// Pushes a frequency map at level `from` one level down.
    ///
    /// Every `(x, count)` adds `count` to each child of `x`, once per
    /// occurrence of the child in `x`'s decomposition. Symbols that were
    /// never decomposed contribute nothing.
    pub fn pushforward(&self, frequencies: &FrequencyMap, from: Level) -> Result<FrequencyMap> {
        if !matches!(from, Level::Qualified | Level::Composite | Level::Atomic) {
            return Err(Error::invalid_aggregation_target(from.letter()));
        }
        let mut result = FrequencyMap::default();
        for (&x, &count) in frequencies {
            if !self.indexes.contains(from, x) {
                return Err(Error::unknown_symbol(x));
            }
            for &y in self.indexes.children(from, x).unwrap_or_default() {
                result
                    .increment(y, count)
                    .map_err(|e| Error::count_overflow("pushforward", e.key))?;
            }
        }
        Ok(result)
    }

    /// Like [`SymbolIndex::frequencies`], keyed by symbol string and sorted
    /// by descending count, then by string.
    pub fn export(&self, subset: &TextSubset, target: Level) -> Result<Vec<(String, u64)>> {
        let frequencies = self.frequencies(subset, target)?;
        let mut rows = frequencies
            .into_iter()
            .map(|(id, count)| Ok((self.symbols.resolve(id)?.to_owned(), count)))
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|(a_name, a_count), (b_name, b_count)| {
            b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
        });
        Ok(rows)
    }

    /// The `n` most frequent symbols at `target`.
    pub fn top_symbols(
        &self,
        subset: &TextSubset,
        target: Level,
        n: usize,
    ) -> Result<Vec<(String, u64)>> {
        let mut rows = self.export(subset, target)?;
        rows.truncate(n);
        Ok(rows)
    }

    fn qualified_frequencies(&self, subset: &TextSubset) -> Result<FrequencyMap> {
        match subset {
            TextSubset::All => Ok(self.indexes.qualified_totals.clone()),
            TextSubset::One(t) => self
                .indexes
                .text_frequencies(*t)
                .cloned()
                .ok_or_else(|| Error::unknown_symbol(*t)),
            TextSubset::Many(texts) => {
                let mut sum = FrequencyMap::default();
                for &t in texts {
                    let frequencies = self
                        .indexes
                        .text_frequencies(t)
                        .ok_or_else(|| Error::unknown_symbol(t))?;
                    sum.add_all(frequencies)
                        .map_err(|e| Error::count_overflow("text subset", e.key))?;
                }
                Ok(sum)
            }
        }
    }
}
