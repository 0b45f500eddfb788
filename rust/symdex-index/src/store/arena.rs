use serde::{Deserialize, Serialize};

use crate::symbol_table::SymbolId;

/// Dense per-level table of entries, indexed directly by symbol id.
///
/// All levels share one symbol table, so an arena only holds entries for the
/// ids that occur at its level; the other slots stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arena<E> {
    slots: Vec<Option<E>>,
}

impl<E> Default for Arena<E> {
    fn default() -> Self {
        Arena { slots: Vec::new() }
    }
}

impl<E> Arena<E> {
    pub fn get(&self, id: SymbolId) -> Option<&E> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut E> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.get(id).is_some()
    }

    /// Stores `entry` at `id`, growing the table as needed.
    pub fn insert(&mut self, id: SymbolId, entry: E) {
        let index = id as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(entry);
    }

    /// Returns the entry at `id`, creating a default one if absent.
    pub fn get_or_insert_default(&mut self, id: SymbolId) -> &mut E
    where
        E: Default,
    {
        let index = id as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].get_or_insert_with(E::default)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// One past the highest id ever stored.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates occupied `(id, entry)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &E)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|entry| (id as SymbolId, entry)))
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.iter().map(|(id, _)| id)
    }
}
