//! Seeded synthetic corpora.

use symdex_index::MemoryCorpus;

const ATOMS: &[&str] = &[
    "get", "set", "read", "write", "line", "buf", "http", "request", "parse", "token", "file",
    "path", "open", "close", "index", "symbol", "node", "tree", "map", "list",
];

/// Generates `text_count` texts named `text_0000`, `text_0001`, ... over a
/// vocabulary of `vocabulary_size` `_`-joined identifiers.
///
/// Identifiers combine one to three atoms, occasionally capitalized, so the
/// same atom recurs across many identifiers and texts. The same seed always
/// produces the same corpus.
pub fn generate_corpus(seed: u64, text_count: usize, vocabulary_size: usize) -> MemoryCorpus {
    assert_ne!(vocabulary_size, 0);
    let mut rng = fastrand::Rng::with_seed(seed);

    let vocabulary: Vec<String> = (0..vocabulary_size)
        .map(|_| {
            let parts = rng.usize(1..=3);
            (0..parts)
                .map(|_| {
                    let atom = ATOMS[rng.usize(..ATOMS.len())];
                    if rng.u8(..4) == 0 {
                        let mut chars = atom.chars();
                        chars
                            .next()
                            .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                            .unwrap_or_default()
                    } else {
                        atom.to_owned()
                    }
                })
                .collect::<Vec<_>>()
                .join("_")
        })
        .collect();

    (0..text_count)
        .map(|i| {
            let words = rng.usize(1..=20);
            let text = (0..words)
                .map(|_| vocabulary[rng.usize(..vocabulary.len())].as_str())
                .collect::<Vec<_>>()
                .join(" ");
            (format!("text_{i:04}"), text)
        })
        .collect()
}
