//! Integrity checks applied to a snapshot before it becomes a live index.
//!
//! Backward maps and histograms are recomputed from the forward relations and
//! compared with the stored ones, so a snapshot that loads is guaranteed to
//! satisfy the same invariants as an index grown by the builder.

use symdex_collections::{
    count_map::{CountMap, CountMapExt, CountOverflow},
    identity_hash::IdentityHashMap,
};
use symdex_common::{Result, error::Error, verify_data};

use super::{Indexes, LengthHistogram};
use crate::symbol_table::{SymbolId, SymbolTable};

pub(crate) fn validate(table: &SymbolTable, indexes: &Indexes) -> Result<()> {
    let symbol_count = table.len();
    verify_data!(texts, indexes.texts.slot_count() <= symbol_count);
    verify_data!(qualified, indexes.qualified.slot_count() <= symbol_count);
    verify_data!(composite, indexes.composite.slot_count() <= symbol_count);
    verify_data!(atomic, indexes.atomic.slot_count() <= symbol_count);
    verify_data!(root, indexes.root.slot_count() <= symbol_count);

    let check_id = |context: &str, id: SymbolId| -> Result<()> {
        if table.contains_id(id) {
            Ok(())
        } else {
            Err(Error::persistence(
                context,
                format!("id {id} is absent from the symbol table"),
            ))
        }
    };

    // T -> Q
    let mut q_texts: IdentityHashMap<SymbolId, CountMap> = IdentityHashMap::default();
    let mut totals = CountMap::default();
    for (t, entry) in indexes.texts.iter() {
        for (&q, &count) in &entry.qualified {
            check_id("texts", q)?;
            if count == 0 {
                return Err(Error::persistence(
                    "texts",
                    format!("text {t} records a zero count for symbol {q}"),
                ));
            }
            q_texts
                .entry(q)
                .or_default()
                .increment(t, count)
                .map_err(overflow("qualified"))?;
            totals.increment(q, count).map_err(overflow("qualified_totals"))?;
        }
        if entry.qualified.total() != Some(entry.total) {
            return Err(Error::persistence(
                "texts",
                format!("total of text {t} does not match its occurrence counts"),
            ));
        }
    }
    check_mirror(
        "qualified",
        indexes.qualified.iter().map(|(id, e)| (id, &e.texts)),
        q_texts,
    )?;
    if totals != indexes.qualified_totals {
        return Err(Error::persistence(
            "qualified_totals",
            "totals do not match the per-text occurrence counts",
        ));
    }

    // Q -> C
    let mut c_qualified: IdentityHashMap<SymbolId, CountMap> = IdentityHashMap::default();
    let mut c_length = LengthHistogram::new();
    for (q, entry) in indexes.qualified.iter() {
        if let Some(composites) = &entry.composites {
            for &c in composites {
                check_id("qualified", c)?;
                c_qualified
                    .entry(c)
                    .or_default()
                    .increment(q, 1)
                    .map_err(overflow("composite"))?;
            }
            c_length.entry(composites.len()).or_default().insert(q);
        }
    }
    check_mirror(
        "composite",
        indexes.composite.iter().map(|(id, e)| (id, &e.qualified)),
        c_qualified,
    )?;
    verify_data!(c_length, c_length == indexes.c_length);

    // C -> A
    let mut a_composites: IdentityHashMap<SymbolId, CountMap> = IdentityHashMap::default();
    let mut a_length = LengthHistogram::new();
    for (c, entry) in indexes.composite.iter() {
        if let Some(atomics) = &entry.atomics {
            for &a in atomics {
                check_id("composite", a)?;
                a_composites
                    .entry(a)
                    .or_default()
                    .increment(c, 1)
                    .map_err(overflow("atomic"))?;
            }
            a_length.entry(atomics.len()).or_default().insert(c);
        }
    }
    check_mirror(
        "atomic",
        indexes.atomic.iter().map(|(id, e)| (id, &e.composites)),
        a_composites,
    )?;
    verify_data!(a_length, a_length == indexes.a_length);

    // A -> R
    let mut r_atomics: IdentityHashMap<SymbolId, CountMap> = IdentityHashMap::default();
    for (a, entry) in indexes.atomic.iter() {
        if let Some(r) = entry.root {
            check_id("atomic", r)?;
            r_atomics
                .entry(r)
                .or_default()
                .increment(a, 1)
                .map_err(overflow("root"))?;
        }
    }
    check_mirror(
        "root",
        indexes.root.iter().map(|(id, e)| (id, &e.atomics)),
        r_atomics,
    )
}

fn overflow(context: &str) -> impl Fn(CountOverflow) -> Error + '_ {
    move |e| {
        Error::persistence(
            context,
            format!("occurrence count of symbol {} overflows", e.key),
        )
    }
}

/// Compares stored backward maps with the ones recomputed from the forward
/// relation of the previous level.
fn check_mirror<'a>(
    context: &str,
    stored: impl Iterator<Item = (SymbolId, &'a CountMap)>,
    mut expected: IdentityHashMap<SymbolId, CountMap>,
) -> Result<()> {
    for (id, backward) in stored {
        let mirror = expected.remove(&id).unwrap_or_default();
        if *backward != mirror {
            return Err(Error::persistence(
                context,
                format!("backward map of symbol {id} does not mirror the forward relation"),
            ));
        }
    }
    match expected.keys().min() {
        Some(id) => Err(Error::persistence(
            context,
            format!("symbol {id} is referenced but has no entry"),
        )),
        None => Ok(()),
    }
}
