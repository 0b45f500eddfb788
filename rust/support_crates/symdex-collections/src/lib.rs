//! Integer-keyed collections used throughout the symbol index.

pub mod count_map;
pub mod identity_hash;
