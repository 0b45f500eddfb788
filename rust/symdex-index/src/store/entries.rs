//! Per-level index entries.
//!
//! Each entry keeps the backward (container) counts of its symbol and, for
//! levels that decompose further, the forward relation to the next level.
//! A forward relation of `None` means the symbol has not been decomposed yet.

use serde::{Deserialize, Serialize};
use symdex_collections::count_map::CountMap;

use crate::symbol_table::SymbolId;

/// A text: occurrence counts of the qualified symbols it contains.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    /// Q-id -> occurrences in this text.
    pub qualified: CountMap,
    /// Sum of `qualified`.
    pub total: u64,
}

/// A qualified symbol.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedEntry {
    /// T-id -> occurrences of this symbol in that text.
    pub texts: CountMap,
    /// Ordered C-ids this symbol decomposes into.
    pub composites: Option<Vec<SymbolId>>,
}

/// A composite symbol.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEntry {
    /// Q-id -> number of times this symbol appears in that Q's decomposition.
    pub qualified: CountMap,
    /// Ordered A-ids this symbol decomposes into.
    pub atomics: Option<Vec<SymbolId>>,
}

/// An atomic symbol.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicEntry {
    /// C-id -> number of times this symbol appears in that C's decomposition.
    pub composites: CountMap,
    pub root: Option<SymbolId>,
}

/// A root symbol.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootEntry {
    /// A-id -> participation count.
    pub atomics: CountMap,
}
