//! Incremental, memoized index construction.
//!
//! Ingesting a text records its qualified-symbol occurrences and then
//! cascades the symbols seen for the first time down the chain, one level at
//! a time: new Q symbols are decomposed into C symbols, the new C symbols
//! among those into A symbols, and the new A symbols into roots. Novelty, not
//! occurrence volume, drives the cascade, so every distinct symbol value is
//! decomposed once no matter how often it recurs in the corpus.
//!
//! Each level is processed as an explicit worklist, which keeps the stack
//! depth constant regardless of corpus size.
//!
//! A failed builder call leaves the index in an unspecified state for that
//! input: some levels may have been updated and others not.

use log::{debug, trace, warn};
use symdex_collections::{count_map::CountMapExt, identity_hash::IdentityHashSet};
use symdex_common::{Result, error::Error};

use crate::{
    corpus::TextCorpus,
    decomposer::{Decomposer, DecomposerSelector},
    index::SymbolIndex,
    level::Level,
    store::TextEntry,
    symbol_table::SymbolId,
};

/// Outcome of a [`SymbolIndex::add_corpus`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Texts ingested by this call.
    pub added: usize,
    /// Texts skipped because they were already indexed.
    pub skipped: usize,
}

impl SymbolIndex {
    /// Ingests every text of `corpus` that is not indexed yet, using the
    /// decomposer chosen by `selector` for each text id.
    pub fn add_corpus(
        &mut self,
        corpus: &dyn TextCorpus,
        selector: &dyn DecomposerSelector,
    ) -> Result<IngestSummary> {
        let mut summary = IngestSummary::default();
        for id in corpus.ids() {
            if self.is_text_indexed(&id) {
                warn!("text '{id}' is already indexed, skipping");
                summary.skipped += 1;
                continue;
            }
            let text = corpus.text(&id)?;
            self.add_text(&id, &text, selector.select(&id))?;
            summary.added += 1;
        }
        debug!(
            "corpus ingested: {} texts added, {} skipped, {} symbols interned",
            summary.added,
            summary.skipped,
            self.symbols.len()
        );
        Ok(summary)
    }

    /// Ingests one text and cascades its new symbols down the chain.
    ///
    /// Returns `false` without touching the index if `text_id` was already
    /// ingested.
    pub fn add_text(
        &mut self,
        text_id: &str,
        text: &str,
        decomposer: &dyn Decomposer,
    ) -> Result<bool> {
        let t = self.symbols.intern(text_id);
        if self.indexes.texts.contains(t) {
            return Ok(false);
        }

        let frequencies = decomposer.text_to_qualified_frequencies(text)?;
        for (q, &count) in &frequencies {
            if q.is_empty() {
                return Err(Error::malformed_decomposition(
                    Level::Text.letter(),
                    text_id,
                    "empty qualified symbol",
                ));
            }
            if count == 0 {
                return Err(Error::malformed_decomposition(
                    Level::Text.letter(),
                    text_id,
                    format!("zero occurrence count for '{q}'"),
                ));
            }
            // Checked up front so an overflowing text leaves the index untouched.
            if let Some(known) = self.symbols.lookup(q) {
                let global = self.indexes.qualified_totals.count_of(known);
                if global.checked_add(count).is_none() {
                    return Err(Error::count_overflow("qualified totals", known));
                }
            }
        }
        let total = frequencies
            .values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
            .ok_or_else(|| Error::count_overflow("text total", t))?;

        let mut entry = TextEntry {
            total,
            ..TextEntry::default()
        };
        let mut new_qs = Vec::new();
        let mut queued = IdentityHashSet::default();
        for (q, &count) in &frequencies {
            let q = self.symbols.intern(q);
            entry
                .qualified
                .increment(q, count)
                .map_err(|e| Error::count_overflow("text", e.key))?;
            self.indexes
                .qualified_totals
                .increment(q, count)
                .map_err(|e| Error::count_overflow("qualified totals", e.key))?;

            let q_entry = self.indexes.qualified.get_or_insert_default(q);
            q_entry
                .texts
                .increment(t, count)
                .map_err(|e| Error::count_overflow("qualified", e.key))?;
            if q_entry.composites.is_none() && queued.insert(q) {
                new_qs.push(q);
            }
        }
        debug!(
            "text '{text_id}': {} qualified symbols, {} occurrences, {} new",
            entry.qualified.len(),
            entry.total,
            new_qs.len()
        );
        self.indexes.texts.insert(t, entry);

        self.add_qualified_symbols(&new_qs, decomposer)?;
        Ok(true)
    }

    /// Decomposes qualified symbols into composite symbols, then cascades the
    /// composite symbols seen for the first time.
    ///
    /// Symbols that are already decomposed are skipped.
    pub fn add_qualified_symbols(
        &mut self,
        new_qs: &[SymbolId],
        decomposer: &dyn Decomposer,
    ) -> Result<()> {
        let mut new_cs = Vec::new();
        let mut queued = IdentityHashSet::default();
        for &q in new_qs {
            if self.indexes.children(Level::Qualified, q).is_some() {
                continue;
            }
            let name = self.symbols.resolve(q)?.to_owned();
            let parts = decomposer.qualified_to_composite(&name)?;
            let composites = self.intern_parts(Level::Qualified, &name, &parts)?;
            trace!("Q '{name}' -> {parts:?}");

            for &c in &composites {
                let c_entry = self.indexes.composite.get_or_insert_default(c);
                c_entry
                    .qualified
                    .increment(q, 1)
                    .map_err(|e| Error::count_overflow("composite", e.key))?;
                if c_entry.atomics.is_none() && queued.insert(c) {
                    new_cs.push(c);
                }
            }
            self.indexes
                .c_length
                .entry(composites.len())
                .or_default()
                .insert(q);
            self.indexes.qualified.get_or_insert_default(q).composites = Some(composites);
        }
        debug!(
            "decomposed {} qualified symbols, {} new composite symbols",
            new_qs.len(),
            new_cs.len()
        );
        self.add_composite_symbols(&new_cs, decomposer)
    }

    /// Decomposes composite symbols into atomic symbols, then cascades the
    /// atomic symbols seen for the first time.
    pub fn add_composite_symbols(
        &mut self,
        new_cs: &[SymbolId],
        decomposer: &dyn Decomposer,
    ) -> Result<()> {
        let mut new_as = Vec::new();
        let mut queued = IdentityHashSet::default();
        for &c in new_cs {
            if self.indexes.children(Level::Composite, c).is_some() {
                continue;
            }
            let name = self.symbols.resolve(c)?.to_owned();
            let parts = decomposer.composite_to_atomic(&name)?;
            let atomics = self.intern_parts(Level::Composite, &name, &parts)?;
            trace!("C '{name}' -> {parts:?}");

            for &a in &atomics {
                let a_entry = self.indexes.atomic.get_or_insert_default(a);
                a_entry
                    .composites
                    .increment(c, 1)
                    .map_err(|e| Error::count_overflow("atomic", e.key))?;
                if a_entry.root.is_none() && queued.insert(a) {
                    new_as.push(a);
                }
            }
            self.indexes
                .a_length
                .entry(atomics.len())
                .or_default()
                .insert(c);
            self.indexes.composite.get_or_insert_default(c).atomics = Some(atomics);
        }
        debug!(
            "decomposed {} composite symbols, {} new atomic symbols",
            new_cs.len(),
            new_as.len()
        );
        self.add_atomic_symbols(&new_as, decomposer)
    }

    /// Maps atomic symbols to their roots. The chain ends here.
    pub fn add_atomic_symbols(
        &mut self,
        new_as: &[SymbolId],
        decomposer: &dyn Decomposer,
    ) -> Result<()> {
        for &a in new_as {
            if self.indexes.children(Level::Atomic, a).is_some() {
                continue;
            }
            let name = self.symbols.resolve(a)?.to_owned();
            let root = decomposer.atomic_to_root(&name)?;
            if root.is_empty() {
                return Err(Error::malformed_decomposition(
                    Level::Atomic.letter(),
                    name,
                    "empty root symbol",
                ));
            }
            trace!("A '{name}' -> '{root}'");
            let r = self.symbols.intern(&root);
            self.indexes
                .root
                .get_or_insert_default(r)
                .atomics
                .increment(a, 1)
                .map_err(|e| Error::count_overflow("root", e.key))?;
            self.indexes.atomic.get_or_insert_default(a).root = Some(r);
        }
        Ok(())
    }

    /// Interns the decomposition `parts` of `name`, rejecting empty symbols.
    fn intern_parts(
        &mut self,
        level: Level,
        name: &str,
        parts: &[String],
    ) -> Result<Vec<SymbolId>> {
        if let Some(pos) = parts.iter().position(|part| part.is_empty()) {
            return Err(Error::malformed_decomposition(
                level.letter(),
                name,
                format!("empty symbol at position {pos}"),
            ));
        }
        Ok(parts.iter().map(|part| self.symbols.intern(part)).collect())
    }
}
