use std::collections::BTreeSet;

use serde::Serialize;
use symdex_collections::count_map::CountMapExt;
use symdex_common::{Result, error::Error};

use crate::{
    level::Level,
    store::{Indexes, LengthHistogram},
    symbol_table::{SymbolId, SymbolTable},
};

/// A multi-level symbol index.
///
/// Owns its symbol table and all level maps. The index is grown by the
/// builder operations (`add_corpus`, `add_text`, ...) and can be queried at
/// any point; builder and query operate on the same structure.
#[derive(Debug, Default, Clone)]
pub struct SymbolIndex {
    pub(crate) symbols: SymbolTable,
    pub(crate) indexes: Indexes,
}

/// Distinct symbol counts per level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub symbols: usize,
    pub texts: usize,
    pub qualified: usize,
    pub composite: usize,
    pub atomic: usize,
    pub root: usize,
}

impl SymbolIndex {
    /// Creates an empty index.
    pub fn new() -> SymbolIndex {
        SymbolIndex::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    /// Returns the id of an already interned string.
    pub fn symbol_id(&self, name: &str) -> Result<SymbolId> {
        self.symbols
            .lookup(name)
            .ok_or_else(|| Error::unknown_symbol_name(name))
    }

    pub fn resolve(&self, id: SymbolId) -> Result<&str> {
        self.symbols.resolve(id)
    }

    /// `true` once the text `id` has been ingested.
    pub fn is_text_indexed(&self, id: &str) -> bool {
        self.symbols
            .lookup(id)
            .is_some_and(|id| self.indexes.texts.contains(id))
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            symbols: self.symbols.len(),
            texts: self.indexes.distinct(Level::Text),
            qualified: self.indexes.distinct(Level::Qualified),
            composite: self.indexes.distinct(Level::Composite),
            atomic: self.indexes.distinct(Level::Atomic),
            root: self.indexes.distinct(Level::Root),
        }
    }

    /// Occurrences of the qualified symbol `q` summed over all texts.
    pub fn qualified_total(&self, q: SymbolId) -> Result<u64> {
        if !self.indexes.qualified.contains(q) {
            return Err(Error::unknown_symbol(q));
        }
        Ok(self.indexes.qualified_totals.count_of(q))
    }

    /// Total qualified-symbol occurrences of the text `t`.
    pub fn text_total(&self, t: SymbolId) -> Result<u64> {
        self.indexes
            .texts
            .get(t)
            .map(|entry| entry.total)
            .ok_or_else(|| Error::unknown_symbol(t))
    }

    /// Ordered decomposition of `symbol` at `level` (the single root at `A`).
    ///
    /// A symbol that has an entry but was never decomposed yields an empty list.
    pub fn direct_children(&self, symbol: SymbolId, level: Level) -> Result<Vec<SymbolId>> {
        match level {
            Level::Text => {
                let mut children: Vec<SymbolId> = self
                    .indexes
                    .text_frequencies(symbol)
                    .ok_or_else(|| Error::unknown_symbol(symbol))?
                    .keys()
                    .copied()
                    .collect();
                children.sort_unstable();
                Ok(children)
            }
            Level::Root => {
                if self.indexes.root.contains(symbol) {
                    Ok(Vec::new())
                } else {
                    Err(Error::unknown_symbol(symbol))
                }
            }
            _ => {
                if !self.indexes.contains(level, symbol) {
                    return Err(Error::unknown_symbol(symbol));
                }
                Ok(self
                    .indexes
                    .children(level, symbol)
                    .map(<[SymbolId]>::to_vec)
                    .unwrap_or_default())
            }
        }
    }

    /// The `cLength` histogram for `Q`, the `aLength` histogram for `C`.
    pub fn length_histogram(&self, level: Level) -> Result<&LengthHistogram> {
        self.indexes.length_histogram(level).ok_or_else(|| {
            Error::invalid_arg(
                "level",
                format!("level {level} has no decomposition-length histogram"),
            )
        })
    }

    /// Ids of the symbols at `level` whose decomposition list has length `n`.
    pub fn symbols_with_length(&self, level: Level, n: usize) -> Result<BTreeSet<SymbolId>> {
        Ok(self
            .length_histogram(level)?
            .get(&n)
            .cloned()
            .unwrap_or_default())
    }
}
