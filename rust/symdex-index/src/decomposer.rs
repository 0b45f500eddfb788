//! Caller-supplied decomposition functions.
//!
//! The index memoizes decomposition: each method is invoked at most once per
//! distinct symbol value at its level. Implementations must therefore be
//! deterministic; a decomposer whose output depends on anything other than
//! its argument produces an index that depends on ingestion order.

use std::collections::BTreeMap;

use symdex_common::Result;

/// Qualified symbol -> occurrence count within one text.
pub type QualifiedFrequencies = BTreeMap<String, u64>;

/// Turns a text into qualified symbols, and each symbol into the symbols of
/// the next level.
pub trait Decomposer {
    /// The multiset of qualified symbols occurring in `text`.
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies>;

    /// Ordered composite symbols of a qualified symbol. Repetitions are kept.
    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>>;

    /// Ordered atomic symbols of a composite symbol. Repetitions are kept.
    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>>;

    /// The single root symbol of an atomic symbol.
    fn atomic_to_root(&self, atomic: &str) -> Result<String>;
}

impl<D: Decomposer + ?Sized> Decomposer for &D {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        (**self).text_to_qualified_frequencies(text)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        (**self).qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        (**self).composite_to_atomic(composite)
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        (**self).atomic_to_root(atomic)
    }
}

impl<D: Decomposer + ?Sized> Decomposer for Box<D> {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        (**self).text_to_qualified_frequencies(text)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        (**self).qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        (**self).composite_to_atomic(composite)
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        (**self).atomic_to_root(atomic)
    }
}

/// Chooses the decomposer used for a given text id.
pub trait DecomposerSelector {
    fn select(&self, text_id: &str) -> &dyn Decomposer;
}

/// A plain decomposer is used for every text.
impl<D: Decomposer> DecomposerSelector for D {
    fn select(&self, _text_id: &str) -> &dyn Decomposer {
        self
    }
}
