use std::{
    collections::{HashMap, HashSet},
    hash::Hasher,
};

/// A HashMap that uses an identity hasher for primitive integer keys.
///
/// Symbol ids are dense sequential integers, so they need no real hashing,
/// only spreading across the table.
///
/// # Examples
///
/// ```
/// use symdex_collections::identity_hash::IdentityHashMap;
///
/// let mut map: IdentityHashMap<u32, String> = IdentityHashMap::default();
/// map.insert(42, "value".to_string());
/// assert_eq!(map.get(&42), Some(&"value".to_string()));
/// ```
pub type IdentityHashMap<K, V> = HashMap<K, V, std::hash::BuildHasherDefault<IdentityHasher>>;

/// A HashSet that uses an identity hasher for primitive integer keys.
///
/// # Examples
///
/// ```
/// use symdex_collections::identity_hash::IdentityHashSet;
///
/// let mut set: IdentityHashSet<u32> = IdentityHashSet::default();
/// set.insert(42);
/// assert!(set.contains(&42));
/// ```
pub type IdentityHashSet<K> = HashSet<K, std::hash::BuildHasherDefault<IdentityHasher>>;

/// Hasher for integer keys.
///
/// The low bits of the key are spread into the high bits with a single
/// multiplication so that `hashbrown`'s control bytes (taken from the top 7 bits)
/// still differ between consecutive ids.
#[derive(Default)]
pub struct IdentityHasher(u64);

const SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

impl Hasher for IdentityHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0.wrapping_mul(SPREAD)
    }

    #[inline]
    fn write(&mut self, _: &[u8]) {
        unimplemented!(
            "IdentityHasher is only implemented for primitive integer types: u8, u16, u32, u64, usize"
        );
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.0 = i as u64;
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.0 = i as u64;
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }
}
