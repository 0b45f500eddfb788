//! Per-text decomposer selection.

use std::collections::BTreeMap;

use log::debug;
use symdex_index::{Decomposer, DecomposerSelector};

/// Picks a decomposer by the extension of the text id, falling back to a
/// default for ids with no registered extension.
///
/// Extensions are matched case-insensitively and without the leading dot.
pub struct ExtensionSelector {
    by_extension: BTreeMap<String, Box<dyn Decomposer>>,
    fallback: Box<dyn Decomposer>,
}

impl ExtensionSelector {
    pub fn new(fallback: impl Decomposer + 'static) -> ExtensionSelector {
        ExtensionSelector {
            by_extension: BTreeMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Registers `decomposer` for each of `extensions`, replacing earlier
    /// registrations.
    pub fn with<D>(mut self, extensions: &[&str], decomposer: D) -> ExtensionSelector
    where
        D: Decomposer + Clone + 'static,
    {
        for extension in extensions {
            let extension = normalize(extension);
            debug!("decomposer registered for extension '{extension}'");
            self.by_extension
                .insert(extension, Box::new(decomposer.clone()));
        }
        self
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_extension.keys().map(String::as_str)
    }
}

impl DecomposerSelector for ExtensionSelector {
    fn select(&self, text_id: &str) -> &dyn Decomposer {
        extension_of(text_id)
            .and_then(|extension| self.by_extension.get(&normalize(extension)))
            .map_or(&*self.fallback, |decomposer| &**decomposer)
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// The extension of the last path component of `text_id`, if any.
fn extension_of(text_id: &str) -> Option<&str> {
    let name = text_id.rsplit(['/', '\\']).next()?;
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => Some(&name[dot + 1..]),
        _ => None,
    }
}
