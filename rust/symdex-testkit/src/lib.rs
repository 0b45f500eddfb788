//! Test utilities for the symdex crates.
//!
//! This crate provides:
//! - Stub decomposers with simple, predictable behavior
//! - A call-counting decomposer wrapper for checking memoization
//! - Seeded synthetic corpus generation

pub mod data_gen;
pub mod decomposers;

pub use data_gen::generate_corpus;
pub use decomposers::{CharDecomposer, CountingDecomposer, SplitDecomposer};
