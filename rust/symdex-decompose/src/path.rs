//! Decomposition of file path listings.

use std::collections::BTreeMap;

use symdex_common::Result;
use symdex_index::{Decomposer, QualifiedFrequencies};

use crate::{
    config::PathDecomposerConfig,
    split::{bounded, split_on, split_words},
};

/// Decomposes texts that list file paths, one per line:
///
/// - text: the stem of every component of every path, so
///   `src/tokenizers/unicode_word.rs` yields `src`, `tokenizers` and
///   `unicode_word`;
/// - qualified → composite: split on the part separators (`_`, `-`, `.`);
/// - composite → atomic: split at camelCase transitions;
/// - atomic → root: lower-cased.
#[derive(Debug, Clone, Default)]
pub struct PathDecomposer {
    config: PathDecomposerConfig,
}

impl PathDecomposer {
    pub fn new(config: PathDecomposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(PathDecomposer { config })
    }

    pub fn config(&self) -> &PathDecomposerConfig {
        &self.config
    }

    /// The component stems of one path, root to leaf.
    pub fn components<'a>(&self, path: &'a str) -> Vec<&'a str> {
        path.split(|c| self.config.component_separators.contains(&c))
            .map(str::trim)
            .filter(|component| !matches!(*component, "" | "." | ".."))
            .map(|component| self.stem(component))
            .filter_map(|stem| {
                bounded(
                    stem,
                    self.config.min_symbol_length,
                    self.config.max_symbol_length,
                )
            })
            .collect()
    }

    /// `lib.rs` → `lib`, `archive.tar.gz` → `archive.tar`; a leading dot
    /// does not start an extension, so `.gitignore` keeps its name.
    fn stem<'a>(&self, component: &'a str) -> &'a str {
        if !self.config.strip_extensions {
            return component;
        }
        match component.rfind('.') {
            Some(dot) if dot > 0 => &component[..dot],
            _ => component,
        }
    }

    fn parts_or_self(&self, symbol: &str, parts: Vec<&str>) -> Vec<String> {
        let parts: Vec<String> = parts
            .into_iter()
            .filter_map(|part| {
                bounded(
                    part,
                    self.config.min_symbol_length,
                    self.config.max_symbol_length,
                )
            })
            .map(str::to_owned)
            .collect();
        if parts.is_empty() {
            vec![symbol.to_owned()]
        } else {
            parts
        }
    }
}

impl Decomposer for PathDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        let mut frequencies = BTreeMap::new();
        for path in text.lines() {
            for component in self.components(path) {
                *frequencies.entry(component.to_owned()).or_insert(0) += 1;
            }
        }
        Ok(frequencies)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        let parts = split_on(qualified, &self.config.part_separators);
        Ok(self.parts_or_self(qualified, parts))
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        let parts = split_words(composite, self.config.split_camel_case, false);
        Ok(self.parts_or_self(composite, parts))
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        Ok(if self.config.lowercase_roots {
            atomic.to_lowercase()
        } else {
            atomic.to_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let d = PathDecomposer::default();
        assert_eq!(
            d.components("rust/symdex-index/src/lib.rs"),
            ["rust", "symdex-index", "src", "lib"]
        );
        assert_eq!(d.components("C:\\Users\\me\\notes.txt"), ["C:", "Users", "me", "notes"]);
        assert_eq!(d.components("./a/../.gitignore"), ["a", ".gitignore"]);
        assert!(d.components("//").is_empty());
    }

    #[test]
    fn test_extensions_kept_when_configured() {
        let config = PathDecomposerConfig {
            strip_extensions: false,
            ..Default::default()
        };
        let d = PathDecomposer::new(config).unwrap();
        assert_eq!(d.components("src/lib.rs"), ["src", "lib.rs"]);
        assert_eq!(d.qualified_to_composite("lib.rs").unwrap(), ["lib", "rs"]);
    }

    #[test]
    fn test_text_frequencies() {
        let d = PathDecomposer::default();
        let frequencies = d
            .text_to_qualified_frequencies("src/lib.rs\nsrc/main.rs\n\ntests/lib_tests.rs\n")
            .unwrap();
        assert_eq!(frequencies.get("src"), Some(&2));
        assert_eq!(frequencies.get("lib"), Some(&1));
        assert_eq!(frequencies.get("lib_tests"), Some(&1));
        assert_eq!(frequencies.len(), 5);
    }

    #[test]
    fn test_chain() {
        let d = PathDecomposer::default();
        assert_eq!(
            d.qualified_to_composite("symdex-index_v2").unwrap(),
            ["symdex", "index", "v2"]
        );
        assert_eq!(d.composite_to_atomic("v2").unwrap(), ["v2"]);
        assert_eq!(
            d.composite_to_atomic("DataGen").unwrap(),
            ["Data", "Gen"]
        );
        assert_eq!(d.atomic_to_root("Gen").unwrap(), "gen");
        assert_eq!(d.qualified_to_composite("-_").unwrap(), ["-_"]);
    }
}
