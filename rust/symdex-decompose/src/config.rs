//! Decomposer settings, deserializable from JSON.

use serde::{Deserialize, Serialize};
use symdex_common::{Result, error::Error, verify_arg};

/// Default maximum length of a symbol in bytes before truncation.
pub const DEFAULT_MAX_SYMBOL_LENGTH: usize = 128;

/// Default minimum length of a symbol in bytes.
pub const DEFAULT_MIN_SYMBOL_LENGTH: usize = 1;

/// Settings of the [`IdentifierDecomposer`](crate::IdentifierDecomposer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierDecomposerConfig {
    /// Separators joining the parts of a qualified identifier, such as
    /// `::` in `std::io` or `.` in `os.path`.
    pub qualified_separators: Vec<String>,
    /// Symbols shorter than this are dropped.
    pub min_symbol_length: usize,
    /// Symbols longer than this are truncated at a character boundary.
    pub max_symbol_length: usize,
    pub split_camel_case: bool,
    pub split_digits: bool,
    pub lowercase_roots: bool,
}

impl Default for IdentifierDecomposerConfig {
    fn default() -> Self {
        IdentifierDecomposerConfig {
            qualified_separators: ["::", ".", "_"].map(String::from).to_vec(),
            min_symbol_length: DEFAULT_MIN_SYMBOL_LENGTH,
            max_symbol_length: DEFAULT_MAX_SYMBOL_LENGTH,
            split_camel_case: true,
            split_digits: true,
            lowercase_roots: true,
        }
    }
}

impl IdentifierDecomposerConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_arg("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(max_symbol_length, self.max_symbol_length > 0);
        verify_arg!(
            min_symbol_length,
            self.min_symbol_length <= self.max_symbol_length
        );
        verify_arg!(
            qualified_separators,
            self.qualified_separators.iter().all(|sep| !sep.is_empty())
        );
        Ok(())
    }
}

/// Settings of the [`PathDecomposer`](crate::PathDecomposer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDecomposerConfig {
    /// Characters separating the components of a path.
    pub component_separators: Vec<char>,
    /// Separators between the parts of a file or directory name.
    pub part_separators: Vec<String>,
    /// Drop the last extension of each component (`lib.rs` becomes `lib`).
    pub strip_extensions: bool,
    pub min_symbol_length: usize,
    pub max_symbol_length: usize,
    pub split_camel_case: bool,
    pub lowercase_roots: bool,
}

impl Default for PathDecomposerConfig {
    fn default() -> Self {
        PathDecomposerConfig {
            component_separators: vec!['/', '\\'],
            part_separators: ["_", "-", "."].map(String::from).to_vec(),
            strip_extensions: true,
            min_symbol_length: DEFAULT_MIN_SYMBOL_LENGTH,
            max_symbol_length: DEFAULT_MAX_SYMBOL_LENGTH,
            split_camel_case: true,
            lowercase_roots: true,
        }
    }
}

impl PathDecomposerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_arg("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(max_symbol_length, self.max_symbol_length > 0);
        verify_arg!(
            min_symbol_length,
            self.min_symbol_length <= self.max_symbol_length
        );
        verify_arg!(component_separators, !self.component_separators.is_empty());
        verify_arg!(
            part_separators,
            self.part_separators.iter().all(|sep| !sep.is_empty())
        );
        Ok(())
    }
}
