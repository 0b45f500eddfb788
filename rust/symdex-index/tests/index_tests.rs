use std::collections::BTreeSet;

use symdex_common::{Result, error::Error};
use symdex_index::{
    Decomposer, Level, MemoryCorpus, QualifiedFrequencies, SymbolIndex, TextCorpus, TextSubset,
};
use symdex_testkit::{CharDecomposer, CountingDecomposer, SplitDecomposer, generate_corpus};

fn scenario_corpus() -> MemoryCorpus {
    [("doc1", "foo_bar foo_baz"), ("doc2", "foo_bar")]
        .into_iter()
        .collect()
}

fn named(index: &SymbolIndex, subset: &TextSubset, level: Level) -> Vec<(String, u64)> {
    let mut rows: Vec<_> = index
        .frequencies(subset, level)
        .unwrap()
        .into_iter()
        .map(|(id, count)| (index.resolve(id).unwrap().to_owned(), count))
        .collect();
    rows.sort();
    rows
}

fn rows(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|&(s, n)| (s.to_owned(), n)).collect()
}

#[test]
fn test_concrete_scenario() {
    let mut index = SymbolIndex::new();
    index.add_corpus(&scenario_corpus(), &SplitDecomposer).unwrap();

    assert_eq!(
        named(&index, &TextSubset::All, Level::Qualified),
        rows(&[("foo_bar", 2), ("foo_baz", 1)])
    );
    assert_eq!(
        named(&index, &TextSubset::All, Level::Composite),
        rows(&[("bar", 2), ("baz", 1), ("foo", 3)])
    );

    let foo = index.symbol_id("foo").unwrap();
    let expected: BTreeSet<_> = ["foo_bar", "foo_baz"]
        .iter()
        .map(|s| index.symbol_id(s).unwrap())
        .collect();
    assert_eq!(
        index.direct_containers(foo, Level::Composite).unwrap(),
        expected
    );

    let tree = index
        .containers_tree(foo, Level::Composite, Level::Text)
        .unwrap();
    let doc1 = index.symbol_id("doc1").unwrap();
    let doc2 = index.symbol_id("doc2").unwrap();
    for branch in &tree.containers {
        assert_eq!(branch.level, Level::Qualified);
        let texts: BTreeSet<_> = branch.containers.iter().map(|n| n.symbol).collect();
        if index.resolve(branch.symbol).unwrap() == "foo_bar" {
            assert_eq!(texts, BTreeSet::from([doc1, doc2]));
        } else {
            assert_eq!(texts, BTreeSet::from([doc1]));
        }
    }
}

#[test]
fn test_each_symbol_decomposed_once() {
    let corpus = generate_corpus(11, 60, 40);
    let decomposer = CountingDecomposer::new(CharDecomposer);
    let mut index = SymbolIndex::new();
    index.add_corpus(&corpus, &decomposer).unwrap();

    // Re-ingesting the same vocabulary under new text ids decomposes nothing new.
    for id in corpus.ids().into_iter().take(10) {
        let text = corpus.text(&id).unwrap();
        index
            .add_text(&format!("copy_of_{id}"), &text, &decomposer)
            .unwrap();
    }

    assert_eq!(decomposer.max_calls_per_symbol(), 1);
    let stats = index.stats();
    assert_eq!(decomposer.distinct_calls(Level::Qualified), stats.qualified);
    assert_eq!(decomposer.distinct_calls(Level::Composite), stats.composite);
    assert_eq!(decomposer.distinct_calls(Level::Atomic), stats.atomic);
    assert_eq!(decomposer.total_calls(Level::Atomic), stats.atomic);
}

#[test]
fn test_shared_vocabulary_across_texts() {
    let decomposer = CountingDecomposer::new(SplitDecomposer);
    let mut index = SymbolIndex::new();
    for i in 0..100 {
        index
            .add_text(&format!("file{i}"), "read_line read_line write_line", &decomposer)
            .unwrap();
    }
    assert_eq!(decomposer.calls_for(Level::Qualified, "read_line"), 1);
    assert_eq!(decomposer.calls_for(Level::Composite, "line"), 1);
    assert_eq!(decomposer.calls_for(Level::Atomic, "line"), 1);

    let read_line = index.symbol_id("read_line").unwrap();
    assert_eq!(index.qualified_total(read_line).unwrap(), 200);
    let file7 = index.symbol_id("file7").unwrap();
    assert_eq!(index.text_total(file7).unwrap(), 3);
}

#[test]
fn test_idempotent_reingestion() {
    let corpus = generate_corpus(3, 20, 25);
    let mut index = SymbolIndex::new();
    index.add_corpus(&corpus, &SplitDecomposer).unwrap();
    let before = index.to_snapshot();

    let summary = index.add_corpus(&corpus, &SplitDecomposer).unwrap();
    assert_eq!(summary.added, 0);
    assert_eq!(summary.skipped, corpus.len());
    for id in corpus.ids() {
        assert!(!index.add_text(&id, "brand_new words", &SplitDecomposer).unwrap());
    }

    let after = index.to_snapshot();
    assert_eq!(after.symbol_table, before.symbol_table);
    assert_eq!(after.indexes, before.indexes);
}

/// Returns configurable garbage at one level.
struct BrokenDecomposer {
    level: Level,
}

impl Decomposer for BrokenDecomposer {
    fn text_to_qualified_frequencies(&self, text: &str) -> Result<QualifiedFrequencies> {
        let mut frequencies = SplitDecomposer.text_to_qualified_frequencies(text)?;
        if self.level == Level::Text {
            frequencies.insert("ghost".to_owned(), 0);
        }
        Ok(frequencies)
    }

    fn qualified_to_composite(&self, qualified: &str) -> Result<Vec<String>> {
        if self.level == Level::Qualified {
            return Ok(vec!["ok".to_owned(), String::new()]);
        }
        SplitDecomposer.qualified_to_composite(qualified)
    }

    fn composite_to_atomic(&self, composite: &str) -> Result<Vec<String>> {
        if self.level == Level::Composite {
            return Ok(vec![String::new()]);
        }
        SplitDecomposer.composite_to_atomic(composite)
    }

    fn atomic_to_root(&self, atomic: &str) -> Result<String> {
        if self.level == Level::Atomic {
            return Ok(String::new());
        }
        SplitDecomposer.atomic_to_root(atomic)
    }
}

#[test]
fn test_malformed_decomposition_names_symbol_and_level() {
    for level in [Level::Text, Level::Qualified, Level::Composite, Level::Atomic] {
        let mut index = SymbolIndex::new();
        let err = index
            .add_text("doc", "alpha_beta", &BrokenDecomposer { level })
            .unwrap_err();
        assert!(err.is_malformed_decomposition(), "{level}: {err}");
        match err.kind() {
            symdex_common::error::ErrorKind::MalformedDecomposition { level: l, .. } => {
                assert_eq!(l, level.letter())
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }
}

#[test]
fn test_malformed_text_leaves_no_text_entry() {
    let mut index = SymbolIndex::new();
    assert!(
        index
            .add_text("doc", "alpha", &BrokenDecomposer { level: Level::Text })
            .is_err()
    );
    assert!(!index.is_text_indexed("doc"));
    assert!(index.add_text("doc", "alpha", &SplitDecomposer).unwrap());
}

struct FailingDecomposer;

#[derive(Debug)]
struct Unparsable;

impl std::fmt::Display for Unparsable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unparsable input")
    }
}

impl std::error::Error for Unparsable {}

impl Decomposer for FailingDecomposer {
    fn text_to_qualified_frequencies(&self, _text: &str) -> Result<QualifiedFrequencies> {
        Err(Error::external("tokenizer", Unparsable))
    }

    fn qualified_to_composite(&self, _qualified: &str) -> Result<Vec<String>> {
        unreachable!()
    }

    fn composite_to_atomic(&self, _composite: &str) -> Result<Vec<String>> {
        unreachable!()
    }

    fn atomic_to_root(&self, _atomic: &str) -> Result<String> {
        unreachable!()
    }
}

#[test]
fn test_decomposer_errors_propagate() {
    let mut index = SymbolIndex::new();
    let err = index
        .add_corpus(&scenario_corpus(), &FailingDecomposer)
        .unwrap_err();
    assert_eq!(err.to_string(), "tokenizer: unparsable input");
}

#[test]
fn test_direct_children_and_histogram_queries() {
    let mut index = SymbolIndex::new();
    index.add_corpus(&scenario_corpus(), &CharDecomposer).unwrap();

    let bar = index.symbol_id("bar").unwrap();
    let children: Vec<_> = index
        .direct_children(bar, Level::Composite)
        .unwrap()
        .into_iter()
        .map(|id| index.resolve(id).unwrap().to_owned())
        .collect();
    assert_eq!(children, vec!["b", "a", "r"]);

    let o = index.symbol_id("o").unwrap();
    assert_eq!(index.direct_children(o, Level::Atomic).unwrap(), vec![o]);
    assert!(index.direct_children(o, Level::Root).unwrap().is_empty());

    let three = index.symbols_with_length(Level::Composite, 3).unwrap();
    assert_eq!(three.len(), 3);
    assert!(index.length_histogram(Level::Atomic).is_err());
}
