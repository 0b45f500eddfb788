//! Occurrence-count maps keyed by symbol id.

use std::fmt;

use crate::identity_hash::IdentityHashMap;

/// Map from symbol id to a non-negative occurrence count.
pub type CountMap = IdentityHashMap<u32, u64>;

/// A count addition that does not fit in `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOverflow {
    /// The key whose count overflowed.
    pub key: u32,
}

impl fmt::Display for CountOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "occurrence count of key {} overflows u64", self.key)
    }
}

impl std::error::Error for CountOverflow {}

/// Get-or-default-then-increment operations on count maps.
///
/// Additions are checked: a count never wraps around. On overflow the
/// offending key keeps its previous count.
pub trait CountMapExt {
    /// Adds `by` to the count of `key`, inserting zero first if absent.
    /// Returns the updated count.
    fn increment(&mut self, key: u32, by: u64) -> Result<u64, CountOverflow>;

    /// Returns the count of `key`, or zero when absent.
    fn count_of(&self, key: u32) -> u64;

    /// Adds every count of `other` into `self`, key by key.
    ///
    /// Keys added before an overflow keep their new counts.
    fn add_all(&mut self, other: &CountMap) -> Result<(), CountOverflow>;

    /// Sum of all counts, or `None` if it does not fit in `u64`.
    fn total(&self) -> Option<u64>;
}

impl CountMapExt for CountMap {
    #[inline]
    fn increment(&mut self, key: u32, by: u64) -> Result<u64, CountOverflow> {
        let slot = self.entry(key).or_insert(0);
        *slot = slot.checked_add(by).ok_or(CountOverflow { key })?;
        Ok(*slot)
    }

    #[inline]
    fn count_of(&self, key: u32) -> u64 {
        self.get(&key).copied().unwrap_or(0)
    }

    fn add_all(&mut self, other: &CountMap) -> Result<(), CountOverflow> {
        self.reserve(other.len());
        for (&key, &count) in other {
            self.increment(key, count)?;
        }
        Ok(())
    }

    fn total(&self) -> Option<u64> {
        self.values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
    }
}
