use ahash::AHashMap;
use symdex_common::{Result, error::Error};

/// Interned symbol identifier. Ids are dense and allocated sequentially from 0.
pub type SymbolId = u32;

/// A bidirectional mapping between strings and compact integer identifiers.
///
/// Every distinct string is assigned the next unused id the first time it is
/// interned; later calls return the same id. Ids are stable for the lifetime
/// of the table and never reused, since the table only grows.
///
/// One table is shared by all index levels: the same string seen as a text id
/// and as a root symbol has a single id.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    /// String-to-id lookup.
    ids: AHashMap<String, SymbolId>,
    /// Id-to-string storage, indexed by id.
    strings: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Rebuilds a table from strings listed in id order.
    ///
    /// Fails with a persistence error if a string occurs twice, since that
    /// would break the inverse relation between `intern` and `resolve`.
    pub fn from_strings(strings: Vec<String>) -> Result<SymbolTable> {
        if strings.len() > SymbolId::MAX as usize {
            return Err(Error::persistence(
                "symbol_table",
                format!("{} symbols exceed the id space", strings.len()),
            ));
        }
        let mut ids = AHashMap::with_capacity(strings.len());
        for (id, s) in strings.iter().enumerate() {
            if ids.insert(s.clone(), id as SymbolId).is_some() {
                return Err(Error::persistence(
                    "symbol_table",
                    format!("duplicate symbol '{s}' at id {id}"),
                ));
            }
        }
        Ok(SymbolTable { ids, strings })
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the id of `s`, allocating the next unused id if `s` is new.
    ///
    /// # Panics
    /// Panics if the table already holds `u32::MAX` strings.
    pub fn intern(&mut self, s: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        assert!(
            self.strings.len() < SymbolId::MAX as usize,
            "symbol table is full"
        );
        let id = self.strings.len() as SymbolId;
        self.ids.insert(s.to_owned(), id);
        self.strings.push(s.to_owned());
        id
    }

    /// Returns the id of `s` without interning it.
    pub fn lookup(&self, s: &str) -> Option<SymbolId> {
        self.ids.get(s).copied()
    }

    /// Returns the original string for `id`.
    pub fn resolve(&self, id: SymbolId) -> Result<&str> {
        self.strings
            .get(id as usize)
            .map(String::as_str)
            .ok_or_else(|| Error::unknown_symbol(id))
    }

    pub fn contains_id(&self, id: SymbolId) -> bool {
        (id as usize) < self.strings.len()
    }

    /// Iterates `(id, string)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.strings
            .iter()
            .enumerate()
            .map(|(id, s)| (id as SymbolId, s.as_str()))
    }

    /// All strings in id order; the persisted form of the table.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut table = SymbolTable::new();
        let foo = table.intern("foo");
        let bar = table.intern("bar");
        assert_eq!(table.intern("foo"), foo);
        assert_ne!(foo, bar);
        assert_eq!(foo, 0);
        assert_eq!(bar, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_resolve_inverts_intern() {
        let mut table = SymbolTable::new();
        for s in ["", "foo_bar", "Foo", "foo", "ünïcödé"] {
            let id = table.intern(s);
            assert_eq!(table.resolve(id).unwrap(), s);
        }
    }

    #[test]
    fn test_resolve_unknown_id() {
        let mut table = SymbolTable::new();
        table.intern("only");
        let err = table.resolve(1).unwrap_err();
        assert!(err.is_unknown_symbol());
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut table = SymbolTable::new();
        assert_eq!(table.lookup("foo"), None);
        assert!(table.is_empty());
        let id = table.intern("foo");
        assert_eq!(table.lookup("foo"), Some(id));
    }

    #[test]
    fn test_from_strings() {
        let table = SymbolTable::from_strings(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(table.lookup("b"), Some(1));
        assert_eq!(table.resolve(0).unwrap(), "a");
        assert!(table.contains_id(1));
        assert!(!table.contains_id(2));

        let err = SymbolTable::from_strings(vec!["a".into(), "a".into()]).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut table = SymbolTable::new();
        table.intern("x");
        table.intern("y");
        table.intern("x");
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(0, "x"), (1, "y")]);
    }
}
