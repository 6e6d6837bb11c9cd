use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;

use super::*;

const SAMPLE_RUBRIC: &str = r#"{
    "rubric_id": "interview-v1",
    "criteria": [
        {
            "id": "c1",
            "name": "Clarity",
            "description": "explains reasoning clearly",
            "weight": 2.0,
            "keywords": ["reasoning", "clear"],
            "min_words": 5
        },
        {
            "id": "c2",
            "name": "Depth"
        }
    ]
}"#;

fn write_rubric(dir: &TempDir, file_name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("write rubric fixture");
    path
}

/// Store that counts inserts so tests can observe cache population.
#[derive(Default)]
struct CountingStore {
    inner: MemoryRubricStore,
    inserts: Mutex<Vec<PathBuf>>,
}

impl RubricStore for CountingStore {
    fn get(&self, path: &Path) -> Option<Arc<Rubric>> {
        self.inner.get(path)
    }

    fn insert(&self, path: PathBuf, rubric: Arc<Rubric>) {
        self.inserts.lock().push(path.clone());
        self.inner.insert(path, rubric);
    }
}

#[test]
fn test_parse_full_document() {
    let rubric = Rubric::from_json_str(SAMPLE_RUBRIC, "inline").unwrap();

    assert_eq!(rubric.id, "interview-v1");
    assert_eq!(rubric.len(), 2);

    let clarity = rubric.criterion("c1").unwrap();
    assert_eq!(clarity.name, "Clarity");
    assert_eq!(clarity.description, "explains reasoning clearly");
    assert_eq!(clarity.weight, 2.0);
    assert_eq!(clarity.keywords, vec!["reasoning", "clear"]);
    assert_eq!(clarity.min_words, 5);
}

#[test]
fn test_optional_fields_are_defaulted() {
    let rubric = Rubric::from_json_str(SAMPLE_RUBRIC, "inline").unwrap();
    let depth = rubric.criterion("c2").unwrap();

    assert_eq!(depth.description, "");
    assert_eq!(depth.weight, 1.0);
    assert!(depth.keywords.is_empty());
    assert_eq!(depth.min_words, 0);
}

#[test]
fn test_missing_rubric_id_defaults() {
    let rubric = Rubric::from_json_str(r#"{"criteria": []}"#, "inline").unwrap();
    assert_eq!(rubric.id, "default");
    assert!(rubric.is_empty());
}

#[test]
fn test_missing_criterion_id_is_error() {
    let err = Rubric::from_json_str(r#"{"criteria": [{"name": "Clarity"}]}"#, "inline")
        .unwrap_err();

    assert!(matches!(
        err,
        RubricError::MissingCriterionField {
            index: 0,
            field: "id"
        }
    ));
}

#[test]
fn test_missing_criterion_name_is_error() {
    let json = r#"{"criteria": [{"id": "a", "name": "A"}, {"id": "b"}]}"#;
    let err = Rubric::from_json_str(json, "inline").unwrap_err();

    assert!(matches!(
        err,
        RubricError::MissingCriterionField {
            index: 1,
            field: "name"
        }
    ));
}

#[test]
fn test_negative_weight_is_rejected() {
    let json = r#"{"criteria": [{"id": "a", "name": "A", "weight": -1.0}]}"#;
    let err = Rubric::from_json_str(json, "inline").unwrap_err();
    assert!(matches!(err, RubricError::InvalidWeight { .. }));
}

#[test]
fn test_duplicate_criterion_is_rejected() {
    let json = r#"{"criteria": [{"id": "a", "name": "A"}, {"id": "a", "name": "B"}]}"#;
    let err = Rubric::from_json_str(json, "inline").unwrap_err();
    assert!(matches!(err, RubricError::DuplicateCriterion { id } if id == "a"));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = Rubric::from_json_str("{ not json", "broken.json").unwrap_err();
    assert!(matches!(err, RubricError::Parse { ref origin, .. } if origin == "broken.json"));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_document_round_trips() {
    let rubric = Rubric::from_json_str(SAMPLE_RUBRIC, "inline").unwrap();
    let json = rubric.to_json_string().unwrap();
    let reparsed = Rubric::from_json_str(&json, "roundtrip").unwrap();

    assert_eq!(rubric, reparsed);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rubric_id"], "interview-v1");
    assert_eq!(value["criteria"][1]["min_words"], 0);
    assert_eq!(value["criteria"][1]["keywords"], serde_json::json!([]));
}

#[test]
fn test_max_weight() {
    let rubric = Rubric::new(
        "r",
        vec![
            Criterion::new("a", "A").with_weight(2.0),
            Criterion::new("b", "B").with_weight(0.5),
        ],
    )
    .unwrap();
    assert_eq!(rubric.max_weight(), 2.0);
    assert_eq!(Rubric::new("empty", Vec::new()).unwrap().max_weight(), 0.0);
}

#[test]
fn test_new_rejects_invalid_weights() {
    for weight in [-0.1, f64::NAN, f64::INFINITY] {
        let result = Rubric::new("r", vec![Criterion::new("a", "A").with_weight(weight)]);
        assert!(
            matches!(result, Err(RubricError::InvalidWeight { ref id, .. }) if id == "a"),
            "weight {weight} should be rejected"
        );
    }
}

#[test]
fn test_new_rejects_duplicate_ids() {
    let result = Rubric::new(
        "r",
        vec![Criterion::new("a", "A"), Criterion::new("a", "Again")],
    );
    assert!(matches!(result, Err(RubricError::DuplicateCriterion { id }) if id == "a"));
}

#[test]
fn test_criterion_validate() {
    assert!(Criterion::new("a", "A").with_weight(1e308).validate().is_ok());
    assert!(Criterion::new("a", "A").with_weight(-1.0).validate().is_err());
}

#[test]
fn test_load_reads_and_caches() {
    let dir = TempDir::new().unwrap();
    let path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);
    let provider = RubricProvider::new(&path);

    let first = provider.load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let second = provider.load(&path).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.id, "interview-v1");
}

#[test]
fn test_load_populates_store_once() {
    let dir = TempDir::new().unwrap();
    let path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);
    let store = Arc::new(CountingStore::default());
    let provider = RubricProvider::with_store(&path, store.clone());

    for _ in 0..3 {
        provider.load(&path).unwrap();
    }

    assert_eq!(store.inserts.lock().as_slice(), &[path]);
}

#[test]
fn test_load_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let provider = RubricProvider::new(&path);

    let err = provider.load(&path).unwrap_err();
    assert!(matches!(err, RubricError::NotFound { path: p } if p == path));
}

#[test]
fn test_load_malformed_file_is_not_cached() {
    let dir = TempDir::new().unwrap();
    let path = write_rubric(&dir, "rubric.json", "[1, 2");
    let provider = RubricProvider::new(&path);

    assert!(matches!(
        provider.load(&path).unwrap_err(),
        RubricError::Parse { .. }
    ));

    std::fs::write(&path, SAMPLE_RUBRIC).unwrap();
    assert_eq!(provider.load(&path).unwrap().id, "interview-v1");
}

#[test]
fn test_resolve_default_uses_default_path() {
    let dir = TempDir::new().unwrap();
    let path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);
    let provider = RubricProvider::new(&path);

    assert_eq!(provider.resolve("default").unwrap().id, "interview-v1");
    assert_eq!(provider.resolve("").unwrap().id, "interview-v1");
    assert_eq!(provider.resolve("  default ").unwrap().id, "interview-v1");
}

#[test]
fn test_resolve_named_rubric_from_dir() {
    let dir = TempDir::new().unwrap();
    let default_path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);
    let rubrics = TempDir::new().unwrap();
    write_rubric(
        &rubrics,
        "sales.json",
        r#"{"rubric_id": "sales", "criteria": [{"id": "s1", "name": "Pitch"}]}"#,
    );

    let provider = RubricProvider::new(&default_path).with_rubric_dir(rubrics.path());

    let rubric = provider.resolve("sales").unwrap();
    assert_eq!(rubric.id, "sales");
    assert_eq!(rubric.criteria[0].name, "Pitch");
}

#[test]
fn test_resolve_unknown_rubric() {
    let dir = TempDir::new().unwrap();
    let default_path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);

    let without_dir = RubricProvider::new(&default_path);
    assert!(matches!(
        without_dir.resolve("sales").unwrap_err(),
        RubricError::UnknownRubric { id } if id == "sales"
    ));

    let with_dir = RubricProvider::new(&default_path).with_rubric_dir(dir.path());
    let err = with_dir.resolve("sales").unwrap_err();
    assert!(err.is_client_error());
}

#[test]
fn test_load_failures_are_not_client_errors() {
    let dir = TempDir::new().unwrap();
    let broken = write_rubric(&dir, "broken.json", "{ nope");
    let provider = RubricProvider::new(&broken);

    assert!(!provider.resolve("default").unwrap_err().is_client_error());
    assert!(!RubricError::NotFound { path: broken }.is_client_error());
}

#[test]
fn test_resolve_rejects_path_traversal() {
    let dir = TempDir::new().unwrap();
    let default_path = write_rubric(&dir, "rubric.json", SAMPLE_RUBRIC);
    let provider = RubricProvider::new(&default_path).with_rubric_dir(dir.path());

    for id in ["../rubric", "a/b", "sales.json", "x y"] {
        assert!(
            matches!(
                provider.resolve(id).unwrap_err(),
                RubricError::InvalidRubricId { .. }
            ),
            "id {id:?} should be rejected"
        );
    }
}

#[test]
fn test_memory_store_len() {
    let store = MemoryRubricStore::new();
    assert!(store.is_empty());

    store.insert(
        PathBuf::from("a.json"),
        Arc::new(Rubric::new("a", Vec::new()).unwrap()),
    );
    assert_eq!(store.len(), 1);
    assert!(store.get(Path::new("a.json")).is_some());
    assert!(store.get(Path::new("b.json")).is_none());
}
