//! The fixed decomposition chain `T -> Q -> C -> A -> R`.
//!
//! Algorithms walk the chain through [`Level::next`], [`Level::previous`] and
//! [`Level::slice`] instead of naming levels directly, so navigation code stays
//! generic over the position in the chain.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use symdex_common::{Result, error::Error};

/// One level of the symbol index, totally ordered from text down to root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// A text of the corpus (a file, a document).
    #[serde(rename = "T")]
    Text,
    /// A qualified symbol occurring in a text, e.g. `std::io::read_line`.
    #[serde(rename = "Q")]
    Qualified,
    /// A composite part of a qualified symbol, e.g. `read_line`.
    #[serde(rename = "C")]
    Composite,
    /// An atomic part of a composite symbol, e.g. `read`.
    #[serde(rename = "A")]
    Atomic,
    /// The root form of an atomic symbol; the chain ends here.
    #[serde(rename = "R")]
    Root,
}

impl Level {
    /// All levels in chain order.
    pub const ALL: [Level; 5] = [
        Level::Text,
        Level::Qualified,
        Level::Composite,
        Level::Atomic,
        Level::Root,
    ];

    /// Position of the level in the chain, starting at 0 for `T`.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Level> {
        Level::ALL.get(index).copied()
    }

    /// Single-letter name used in persisted data and error messages.
    pub const fn letter(self) -> &'static str {
        match self {
            Level::Text => "T",
            Level::Qualified => "Q",
            Level::Composite => "C",
            Level::Atomic => "A",
            Level::Root => "R",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Text => "text",
            Level::Qualified => "qualified",
            Level::Composite => "composite",
            Level::Atomic => "atomic",
            Level::Root => "root",
        }
    }

    /// The level produced by decomposing this one, `None` at `R`.
    pub fn next(self) -> Option<Level> {
        Level::from_index(self.index() + 1)
    }

    /// The level this one is decomposed from, `None` at `T`.
    pub fn previous(self) -> Option<Level> {
        self.index().checked_sub(1).and_then(Level::from_index)
    }

    /// Levels from `from` to `to`, both inclusive, walking in the direction of
    /// `to`: `slice(Q, A)` is `[Q, C, A]`, `slice(A, Q)` is `[A, C, Q]`.
    pub fn slice(from: Level, to: Level) -> Vec<Level> {
        if from <= to {
            Level::ALL[from.index()..=to.index()].to_vec()
        } else {
            Level::ALL[to.index()..=from.index()]
                .iter()
                .rev()
                .copied()
                .collect()
        }
    }

    /// Up to `n` levels following this one, nearest first.
    pub fn next_levels(self, n: usize) -> Vec<Level> {
        Level::ALL
            .iter()
            .skip(self.index() + 1)
            .take(n)
            .copied()
            .collect()
    }

    /// Up to `n` levels preceding this one, nearest first.
    pub fn previous_levels(self, n: usize) -> Vec<Level> {
        Level::ALL[..self.index()]
            .iter()
            .rev()
            .take(n)
            .copied()
            .collect()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Accepts the letters `T Q C A R` and the human names, ignoring case.
impl TryFrom<&str> for Level {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Level::ALL
            .into_iter()
            .find(|level| {
                name.eq_ignore_ascii_case(level.letter()) || name.eq_ignore_ascii_case(level.name())
            })
            .ok_or_else(|| Error::unknown_level(name))
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Level::try_from(s)
    }
}
