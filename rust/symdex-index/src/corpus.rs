//! Text sources for [`SymbolIndex::add_corpus`](crate::SymbolIndex::add_corpus).

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use ahash::AHashMap;

use symdex_common::{Result, error::Error};

/// A collection of texts addressed by string ids.
pub trait TextCorpus {
    /// Ids of all texts, in the order they should be ingested.
    fn ids(&self) -> Vec<String>;

    /// Content of the text `id`.
    fn text(&self, id: &str) -> Result<String>;
}

/// Texts held in memory, ingested in id order.
#[derive(Debug, Default, Clone)]
pub struct MemoryCorpus {
    texts: BTreeMap<String, String>,
}

impl MemoryCorpus {
    pub fn new() -> MemoryCorpus {
        MemoryCorpus::default()
    }

    /// Adds or replaces the text `id`.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(id.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl<I, T> FromIterator<(I, T)> for MemoryCorpus
where
    I: Into<String>,
    T: Into<String>,
{
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        MemoryCorpus {
            texts: iter
                .into_iter()
                .map(|(id, text)| (id.into(), text.into()))
                .collect(),
        }
    }
}

impl TextCorpus for MemoryCorpus {
    fn ids(&self) -> Vec<String> {
        self.texts.keys().cloned().collect()
    }

    fn text(&self, id: &str) -> Result<String> {
        self.texts
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unknown_symbol_name(id))
    }
}

/// Files on disk; a text id is the file path as given.
/// Files on disk; the text id of a file is its path.
///
/// Ids are the lossy UTF-8 rendering of each path, but content is always
/// read through the original path, so non-UTF-8 file names are readable.
/// When two paths render to the same id, the first one wins.
#[derive(Debug, Default, Clone)]
pub struct FileCorpus {
    files: Vec<(String, PathBuf)>,
    by_id: AHashMap<String, usize>,
}

impl FileCorpus {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> FileCorpus {
        let mut corpus = FileCorpus::default();
        for path in paths {
            let path = path.into();
            let id = path.to_string_lossy().into_owned();
            if corpus.by_id.contains_key(&id) {
                continue;
            }
            corpus.by_id.insert(id.clone(), corpus.files.len());
            corpus.files.push((id, path));
        }
        corpus
    }

    /// The file behind text `id`.
    pub fn path(&self, id: &str) -> Option<&Path> {
        self.by_id.get(id).map(|&i| self.files[i].1.as_path())
    }
}

impl TextCorpus for FileCorpus {
    fn ids(&self) -> Vec<String> {
        self.files.iter().map(|(id, _)| id.clone()).collect()
    }

    fn text(&self, id: &str) -> Result<String> {
        let path = self
            .path(id)
            .ok_or_else(|| Error::unknown_symbol_name(id))?;
        std::fs::read_to_string(path).map_err(|e| Error::io(id, e))
    }
}
