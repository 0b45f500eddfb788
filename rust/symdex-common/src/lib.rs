//! Core definitions shared by all symdex-* crates: the error type and the
//! `Result` alias, plus argument/data verification macros.

pub mod error;
pub mod result;

pub use result::Result;
