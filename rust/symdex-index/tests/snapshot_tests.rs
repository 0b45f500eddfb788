use serde_json::Value;
use symdex_index::{Level, MemoryCorpus, SnapshotFormat, SymbolIndex, TextSubset};
use symdex_testkit::{CharDecomposer, SplitDecomposer, generate_corpus};
use tempfile::TempDir;

const LEVELS: [Level; 4] = [Level::Qualified, Level::Composite, Level::Atomic, Level::Root];

fn scenario_index() -> SymbolIndex {
    let corpus: MemoryCorpus = [("doc1", "foo_bar foo_baz"), ("doc2", "foo_bar")]
        .into_iter()
        .collect();
    let mut index = SymbolIndex::new();
    index.add_corpus(&corpus, &SplitDecomposer).unwrap();
    index
}

fn assert_same_answers(a: &SymbolIndex, b: &SymbolIndex) {
    assert_eq!(a.symbols().strings(), b.symbols().strings());
    assert_eq!(a.stats(), b.stats());
    for level in LEVELS {
        assert_eq!(
            a.frequencies(&TextSubset::All, level).unwrap(),
            b.frequencies(&TextSubset::All, level).unwrap()
        );
    }
    for t in a.indexes().texts().ids() {
        for level in LEVELS {
            assert_eq!(
                a.frequencies(&TextSubset::One(t), level).unwrap(),
                b.frequencies(&TextSubset::One(t), level).unwrap()
            );
        }
    }
    for (id, _) in a.indexes().composite().iter() {
        assert_eq!(
            a.containers_tree(id, Level::Composite, Level::Text).unwrap(),
            b.containers_tree(id, Level::Composite, Level::Text).unwrap()
        );
    }
}

fn to_json(index: &SymbolIndex) -> Value {
    let mut buf = Vec::new();
    index.save(&mut buf, SnapshotFormat::Json).unwrap();
    serde_json::from_slice(&buf).unwrap()
}

fn load_json(value: &Value) -> symdex_common::Result<SymbolIndex> {
    let bytes = serde_json::to_vec(value).unwrap();
    SymbolIndex::load(bytes.as_slice(), SnapshotFormat::Json)
}

#[test]
fn test_round_trip_in_memory() {
    let corpus = generate_corpus(5, 40, 30);
    let mut index = SymbolIndex::new();
    index.add_corpus(&corpus, &CharDecomposer).unwrap();

    for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
        let mut buf = Vec::new();
        index.save(&mut buf, format).unwrap();
        let loaded = SymbolIndex::load(buf.as_slice(), format).unwrap();
        assert_same_answers(&index, &loaded);
    }
}

#[test]
fn test_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let index = scenario_index();
    for name in ["index.json", "index.symdex"] {
        let path = dir.path().join(name);
        index.save_to_file(&path).unwrap();
        let loaded = SymbolIndex::load_from_file(&path).unwrap();
        assert_same_answers(&index, &loaded);
    }
}

#[test]
fn test_loaded_index_keeps_growing() {
    let index = scenario_index();
    let mut buf = Vec::new();
    index.save(&mut buf, SnapshotFormat::Binary).unwrap();
    let mut loaded = SymbolIndex::load(buf.as_slice(), SnapshotFormat::Binary).unwrap();

    assert!(!loaded.add_text("doc1", "ignored", &SplitDecomposer).unwrap());
    assert!(loaded.add_text("doc3", "foo_qux", &SplitDecomposer).unwrap());
    let foo = loaded.symbol_id("foo").unwrap();
    assert_eq!(
        loaded
            .frequencies(&TextSubset::All, Level::Composite)
            .unwrap()
            .get(&foo),
        Some(&4)
    );
}

#[test]
fn test_snapshot_shape() {
    let json = to_json(&scenario_index());
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["symbol_table"][0], "doc1");
    assert!(object["indexes"]["c_length"].is_object());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = SymbolIndex::load_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn test_truncated_binary() {
    let mut buf = Vec::new();
    scenario_index()
        .save(&mut buf, SnapshotFormat::Binary)
        .unwrap();
    buf.truncate(buf.len() - 5);
    let err = SymbolIndex::load(buf.as_slice(), SnapshotFormat::Binary).unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn test_ids_absent_from_symbol_table() {
    let mut json = to_json(&scenario_index());
    json["symbol_table"].as_array_mut().unwrap().pop();
    assert!(load_json(&json).unwrap_err().is_persistence());
}

#[test]
fn test_duplicate_symbols() {
    let mut json = to_json(&scenario_index());
    json["symbol_table"][1] = json["symbol_table"][0].clone();
    assert!(load_json(&json).unwrap_err().is_persistence());
}

#[test]
fn test_inconsistent_totals() {
    let mut json = to_json(&scenario_index());
    let totals = json["indexes"]["qualified_totals"].as_object_mut().unwrap();
    let first = totals.keys().next().unwrap().clone();
    totals[&first] = Value::from(1000);
    assert!(load_json(&json).unwrap_err().is_persistence());
}

#[test]
fn test_inconsistent_histogram() {
    let mut json = to_json(&scenario_index());
    json["indexes"]["c_length"] = Value::Object(Default::default());
    assert!(load_json(&json).unwrap_err().is_persistence());
}

#[test]
fn test_broken_mirror() {
    let mut json = to_json(&scenario_index());
    // Drop every backward reference from composite symbols to qualified symbols.
    for slot in json["indexes"]["composite"].as_array_mut().unwrap() {
        if let Some(entry) = slot.as_object_mut() {
            entry.insert("qualified".to_owned(), Value::Object(Default::default()));
        }
    }
    assert!(load_json(&json).unwrap_err().is_persistence());
}

#[test]
fn test_zero_counts_are_rejected() {
    let index = scenario_index();
    let doc2 = index.symbol_id("doc2").unwrap().to_string();
    let foo_baz = index.symbol_id("foo_baz").unwrap();
    let mut json = to_json(&index);

    // Mirrored on both sides, so only the zero itself is wrong.
    json["indexes"]["texts"][doc2.parse::<usize>().unwrap()]["qualified"]
        .as_object_mut()
        .unwrap()
        .insert(foo_baz.to_string(), Value::from(0));
    json["indexes"]["qualified"][foo_baz as usize]["texts"]
        .as_object_mut()
        .unwrap()
        .insert(doc2, Value::from(0));

    let err = load_json(&json).unwrap_err();
    assert!(err.is_persistence());
    assert!(err.to_string().contains("zero count"), "{err}");
}
