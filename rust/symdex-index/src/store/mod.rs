//! The persisted representation of the index: one arena per level, the
//! decomposition-length histograms and the global qualified-symbol totals.

mod arena;
mod entries;
pub mod snapshot;
mod validate;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use symdex_collections::count_map::CountMap;

use crate::{level::Level, symbol_table::SymbolId};

pub use arena::Arena;
pub use entries::{AtomicEntry, CompositeEntry, QualifiedEntry, RootEntry, TextEntry};

/// Decomposition-list length -> ids of the symbols whose list has that length.
pub type LengthHistogram = BTreeMap<usize, BTreeSet<SymbolId>>;

/// Forward and backward maps for all five levels.
///
/// Every forward relation has a backward mirror that is updated in the same
/// builder step:
///
/// | forward                      | backward                       |
/// |------------------------------|--------------------------------|
/// | `TextEntry::qualified`       | `QualifiedEntry::texts`        |
/// | `QualifiedEntry::composites` | `CompositeEntry::qualified`    |
/// | `CompositeEntry::atomics`    | `AtomicEntry::composites`      |
/// | `AtomicEntry::root`          | `RootEntry::atomics`           |
///
/// The histograms `c_length`/`a_length` group decomposed Q/C ids by the length
/// of their list; they are only written together with the list itself.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indexes {
    pub(crate) texts: Arena<TextEntry>,
    pub(crate) qualified: Arena<QualifiedEntry>,
    pub(crate) composite: Arena<CompositeEntry>,
    pub(crate) atomic: Arena<AtomicEntry>,
    pub(crate) root: Arena<RootEntry>,
    pub(crate) c_length: LengthHistogram,
    pub(crate) a_length: LengthHistogram,
    /// Q-id -> occurrences summed over all texts.
    pub(crate) qualified_totals: CountMap,
}

impl Indexes {
    pub fn texts(&self) -> &Arena<TextEntry> {
        &self.texts
    }

    pub fn qualified(&self) -> &Arena<QualifiedEntry> {
        &self.qualified
    }

    pub fn composite(&self) -> &Arena<CompositeEntry> {
        &self.composite
    }

    pub fn atomic(&self) -> &Arena<AtomicEntry> {
        &self.atomic
    }

    pub fn root(&self) -> &Arena<RootEntry> {
        &self.root
    }

    pub fn qualified_totals(&self) -> &CountMap {
        &self.qualified_totals
    }

    /// `true` if `level` has an entry for `id`.
    pub fn contains(&self, level: Level, id: SymbolId) -> bool {
        match level {
            Level::Text => self.texts.contains(id),
            Level::Qualified => self.qualified.contains(id),
            Level::Composite => self.composite.contains(id),
            Level::Atomic => self.atomic.contains(id),
            Level::Root => self.root.contains(id),
        }
    }

    /// Number of distinct symbols present at `level`.
    pub fn distinct(&self, level: Level) -> usize {
        match level {
            Level::Text => self.texts.len(),
            Level::Qualified => self.qualified.len(),
            Level::Composite => self.composite.len(),
            Level::Atomic => self.atomic.len(),
            Level::Root => self.root.len(),
        }
    }

    /// Backward map of `id` at `level`: container id -> participation count.
    ///
    /// Returns `None` at `T`, which has no previous level, and for ids without
    /// an entry at `level`.
    pub fn containers(&self, level: Level, id: SymbolId) -> Option<&CountMap> {
        match level {
            Level::Text => None,
            Level::Qualified => self.qualified.get(id).map(|e| &e.texts),
            Level::Composite => self.composite.get(id).map(|e| &e.qualified),
            Level::Atomic => self.atomic.get(id).map(|e| &e.composites),
            Level::Root => self.root.get(id).map(|e| &e.atomics),
        }
    }

    /// Ordered forward relation of `id` from `level` to the next level.
    ///
    /// At `A` the single root is returned as a one-element slice. Returns
    /// `None` at `T` (whose forward relation is a count map, see
    /// [`Indexes::text_frequencies`]), at `R`, for ids without an entry, and
    /// for symbols that were never decomposed.
    pub fn children(&self, level: Level, id: SymbolId) -> Option<&[SymbolId]> {
        match level {
            Level::Text | Level::Root => None,
            Level::Qualified => self.qualified.get(id)?.composites.as_deref(),
            Level::Composite => self.composite.get(id)?.atomics.as_deref(),
            Level::Atomic => self.atomic.get(id)?.root.as_ref().map(std::slice::from_ref),
        }
    }

    /// Q-id -> occurrence counts of text `id`.
    pub fn text_frequencies(&self, id: SymbolId) -> Option<&CountMap> {
        self.texts.get(id).map(|e| &e.qualified)
    }

    /// The length histogram of the decomposition lists produced at `level`:
    /// `cLength` for `Q`, `aLength` for `C`, `None` elsewhere.
    pub fn length_histogram(&self, level: Level) -> Option<&LengthHistogram> {
        match level {
            Level::Qualified => Some(&self.c_length),
            Level::Composite => Some(&self.a_length),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdex_collections::count_map::CountMapExt;

    fn sample() -> Indexes {
        let mut indexes = Indexes::default();
        let text = indexes.texts.get_or_insert_default(0);
        text.qualified.increment(1, 2).unwrap();
        text.total = 2;
        let q = indexes.qualified.get_or_insert_default(1);
        q.texts.increment(0, 2).unwrap();
        q.composites = Some(vec![2, 2]);
        indexes
            .composite
            .get_or_insert_default(2)
            .qualified
            .increment(1, 2)
            .unwrap();
        indexes.c_length.entry(2).or_default().insert(1);
        indexes
    }

    #[test]
    fn test_containers_and_children() {
        let indexes = sample();
        assert_eq!(indexes.children(Level::Qualified, 1), Some(&[2, 2][..]));
        assert_eq!(indexes.children(Level::Composite, 2), None);
        assert_eq!(indexes.children(Level::Text, 0), None);
        assert_eq!(indexes.containers(Level::Composite, 2).unwrap().count_of(1), 2);
        assert!(indexes.containers(Level::Text, 0).is_none());
        assert!(indexes.contains(Level::Qualified, 1));
        assert!(!indexes.contains(Level::Qualified, 2));
    }

    #[test]
    fn test_distinct_and_histograms() {
        let indexes = sample();
        assert_eq!(indexes.distinct(Level::Text), 1);
        assert_eq!(indexes.distinct(Level::Atomic), 0);
        let c_length = indexes.length_histogram(Level::Qualified).unwrap();
        assert_eq!(c_length.get(&2).unwrap().len(), 1);
        assert!(indexes.length_histogram(Level::Root).is_none());
    }
}
