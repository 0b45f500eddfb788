//! Multi-level symbol index.
//!
//! Builds and queries an index over a corpus of texts in which every text is
//! decomposed along a fixed chain of levels:
//!
//! ```text
//! T (text) -> Q (qualified symbol) -> C (composite symbol) -> A (atomic symbol) -> R (root symbol)
//! ```
//!
//! The caller supplies the corpus ([`TextCorpus`]) and the decomposition
//! functions ([`Decomposer`]); the index interns every symbol, decomposes each
//! distinct symbol exactly once, and keeps forward and backward relations
//! between consecutive levels in sync. Queries aggregate occurrence counts of
//! any subset of texts at any level below `T`, and navigate from a symbol up
//! to the symbols and texts that contain it.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use symdex_common::Result;
//! use symdex_index::{Decomposer, Level, MemoryCorpus, SymbolIndex, TextSubset};
//!
//! struct Underscores;
//!
//! impl Decomposer for Underscores {
//!     fn text_to_qualified_frequencies(&self, text: &str) -> Result<BTreeMap<String, u64>> {
//!         let mut frequencies = BTreeMap::new();
//!         for word in text.split_whitespace() {
//!             *frequencies.entry(word.to_string()).or_insert(0) += 1;
//!         }
//!         Ok(frequencies)
//!     }
//!     fn qualified_to_composite(&self, q: &str) -> Result<Vec<String>> {
//!         Ok(q.split('_').map(String::from).collect())
//!     }
//!     fn composite_to_atomic(&self, c: &str) -> Result<Vec<String>> {
//!         Ok(vec![c.to_string()])
//!     }
//!     fn atomic_to_root(&self, a: &str) -> Result<String> {
//!         Ok(a.to_lowercase())
//!     }
//! }
//!
//! let corpus: MemoryCorpus = [("doc1", "foo_bar foo_baz"), ("doc2", "foo_bar")]
//!     .into_iter()
//!     .collect();
//! let mut index = SymbolIndex::new();
//! index.add_corpus(&corpus, &Underscores).unwrap();
//!
//! let composites = index.export(&TextSubset::All, Level::Composite).unwrap();
//! assert_eq!(composites[0], ("foo".to_string(), 3));
//! ```

pub mod builder;
pub mod corpus;
pub mod decomposer;
pub mod index;
pub mod level;
pub mod query;
pub mod store;
pub mod symbol_table;

#[cfg(test)]
mod testing;

pub use builder::IngestSummary;
pub use corpus::{FileCorpus, MemoryCorpus, TextCorpus};
pub use decomposer::{Decomposer, DecomposerSelector, QualifiedFrequencies};
pub use index::{IndexStats, SymbolIndex};
pub use level::Level;
pub use query::{CloudRenderer, CloudTag, ContainerTree, FrequencyMap, TextSubset, WeightedCloud};
pub use store::snapshot::{Snapshot, SnapshotFormat};
pub use symbol_table::{SymbolId, SymbolTable};
