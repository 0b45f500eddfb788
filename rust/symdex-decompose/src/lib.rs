//! Concrete decomposers for source identifiers and file paths.
//!
//! Decomposers are used in two places:
//!
//! 1. **Ingestion**: the index builder asks a decomposer for the qualified
//!    symbols of every new text, then for the children of every symbol it has
//!    not seen before at its level.
//! 2. **Selection**: a corpus mixing file kinds picks a decomposer per text id,
//!    typically by extension (see [`ExtensionSelector`]).

pub mod config;
pub mod identifier;
pub mod path;
pub mod selector;
mod split;

use symdex_common::{Result, error::Error};
use symdex_index::Decomposer;

pub use config::{IdentifierDecomposerConfig, PathDecomposerConfig};
pub use identifier::IdentifierDecomposer;
pub use path::PathDecomposer;
pub use selector::ExtensionSelector;

/// The built-in decomposer families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecomposerKind {
    /// Source code: qualified identifiers split into camelCase words.
    Identifier,
    /// Lists of file paths: path component stems split into name parts.
    Path,
}

impl DecomposerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            DecomposerKind::Identifier => "identifier",
            DecomposerKind::Path => "path",
        }
    }
}

impl TryFrom<&str> for DecomposerKind {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "identifier" => Ok(DecomposerKind::Identifier),
            "path" => Ok(DecomposerKind::Path),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized decomposer: {name}"),
            )),
        }
    }
}

/// Creates a decomposer with default settings by name.
///
/// # Errors
/// Returns [`Error::invalid_arg`] if `name` is not a known decomposer kind.
pub fn create_decomposer(name: &str) -> Result<Box<dyn Decomposer>> {
    match name.try_into()? {
        DecomposerKind::Identifier => Ok(Box::new(IdentifierDecomposer::default())),
        DecomposerKind::Path => Ok(Box::new(PathDecomposer::default())),
    }
}
