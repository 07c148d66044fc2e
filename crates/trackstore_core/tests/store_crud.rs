use serde_json::json;
use std::path::PathBuf;
use trackstore_core::{CollectionStore, Record, Status, StoreConfig, StoreError};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixture/data")
}

fn open_fixture_store() -> (CollectionStore, tempfile::TempDir) {
    let output_dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(fixture_dir(), output_dir.path());
    (CollectionStore::open(config).unwrap(), output_dir)
}

#[test]
fn open_loads_fixture_collections() {
    let (store, _out) = open_fixture_store();

    let tracks = store.find("tracks").unwrap();
    assert!(tracks.contains(&Record::with_title("1", "That's All Right")));
    assert!(tracks.contains(&Record::with_title("2", "Blue Moon of Kentucky")));
    assert_eq!(store.collection_names(), vec!["tracks".to_string()]);
}

#[test]
fn open_missing_directory_is_a_hard_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("bad/path");

    let err = CollectionStore::open(StoreConfig::default().with_data_dir(&missing)).unwrap_err();
    assert!(matches!(err, StoreError::DirectoryNotFound(path) if path == missing));
}

#[test]
fn open_rejects_file_used_as_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("tracks.json");
    std::fs::write(&file, "[]").unwrap();

    let err = CollectionStore::open(StoreConfig::default().with_data_dir(&file)).unwrap_err();
    assert!(matches!(err, StoreError::DirectoryNotFound(_)));
}

#[test]
fn open_default_matches_explicit_bundled_directory() {
    let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let explicit = CollectionStore::open(StoreConfig::default().with_data_dir(bundled)).unwrap();
    let implicit = CollectionStore::open_default().unwrap();

    assert_eq!(
        explicit.find("tracks").unwrap(),
        implicit.find("tracks").unwrap()
    );
}

#[test]
fn open_rejects_malformed_collection_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tracks.json"), r#"{"_id":"1"}"#).unwrap();

    let err = CollectionStore::open(StoreConfig::default().with_data_dir(dir.path())).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn open_rejects_empty_id_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tracks.json"),
        r#"[{"_id":"","titles":["Nameless"]}]"#,
    )
    .unwrap();

    let err = CollectionStore::open(StoreConfig::default().with_data_dir(dir.path())).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn create_appends_record_at_end() {
    let (mut store, _out) = open_fixture_store();
    let initial_len = store.find("tracks").unwrap().len();

    let result = store.create("tracks", &json!({"_id": "3", "titles": ["If I Needed Someone"]}));
    assert_eq!(result.status, Status::Ok);
    assert_eq!(result.id.as_deref(), Some("3"));

    let tracks = store.find("tracks").unwrap();
    assert_eq!(tracks.len(), initial_len + 1);
    assert_eq!(
        tracks.last(),
        Some(&Record::with_title("3", "If I Needed Someone"))
    );
}

#[test]
fn create_drops_fields_other_than_id_and_titles() {
    let (mut store, _out) = open_fixture_store();

    let result = store.create(
        "tracks",
        &json!({"_id": "3", "titles": ["Uh, Zoom Zip"], "releases": ["Ruby Vroom"]}),
    );
    assert!(result.is_ok());

    let created = store
        .find("tracks")
        .unwrap()
        .into_iter()
        .find(|record| record.id == "3")
        .unwrap();
    assert_eq!(created.to_value(), json!({"_id": "3", "titles": ["Uh, Zoom Zip"]}));
}

#[test]
fn create_duplicate_id_is_rejected_without_mutation() {
    let (mut store, _out) = open_fixture_store();
    let before = store.find("tracks").unwrap();

    let result = store.create(
        "tracks",
        &json!({"_id": "2", "titles": ["Someone Keeps Moving My Chair"]}),
    );
    assert_eq!(result.status, Status::Error);
    assert_eq!(result.id, None);
    assert!(result.message.contains("already exists"));

    let after = store.find("tracks").unwrap();
    assert_eq!(after, before);
    assert_eq!(after.len(), 2);
    assert!(after.contains(&Record::with_title("2", "Blue Moon of Kentucky")));
}

#[test]
fn create_invalid_candidates_return_error_and_leave_collection_unchanged() {
    let (mut store, _out) = open_fixture_store();
    let before = store.find("tracks").unwrap();

    let candidates = [
        json!({"titles": ["Everybody's Got Something To Hide"]}),
        json!({"_id": "", "titles": ["Quiet Village"]}),
        json!({"_id": true, "titles": ["Don't Think Twice, It's Alright"]}),
        json!({"_id": "3"}),
        json!({"_id": "3", "titles": "The Battle Of Who Could Care Less"}),
        json!({"_id": "3", "titles": [true, "True"]}),
        json!("not a record"),
    ];

    for candidate in &candidates {
        let result = store.create("tracks", candidate);
        assert_eq!(result.status, Status::Error, "candidate {candidate} should fail");
        assert_eq!(store.find("tracks").unwrap(), before);
    }
}

#[test]
fn create_into_unknown_collection_returns_error() {
    let (mut store, _out) = open_fixture_store();

    let result = store.create(
        "invalid collection",
        &json!({"_id": "3", "titles": ["All The Things You Could Be By Now"]}),
    );
    assert_eq!(result.status, Status::Error);
    assert_eq!(store.collection_names(), vec!["tracks".to_string()]);
}

#[test]
fn created_ids_stay_unique() {
    let (mut store, _out) = open_fixture_store();

    for id in ["3", "4", "3", "1", "4", "5"] {
        store.add("tracks", id, "Repeat");
    }

    let tracks = store.find("tracks").unwrap();
    let mut ids: Vec<_> = tracks.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    ids.dedup();
    assert_eq!(ids.len(), tracks.len());
}

#[test]
fn find_returns_independent_copies() {
    let (mut store, _out) = open_fixture_store();

    let mut copy = store.find("tracks").unwrap();
    copy.clear();
    assert_eq!(store.find("tracks").unwrap().len(), 2);

    let mut copy = store.find("tracks").unwrap();
    copy[0].titles.push("Mutated".to_string());
    assert_eq!(
        store.find("tracks").unwrap()[0],
        Record::with_title("1", "That's All Right")
    );

    let before = store.find("tracks").unwrap();
    store.create("tracks", &json!({"_id": "3", "titles": ["Flesh, Blood, and Bone"]}));
    assert_ne!(store.find("tracks").unwrap(), before);
    assert_eq!(before.len(), 2);
}

#[test]
fn find_without_name_is_a_hard_failure() {
    let (store, _out) = open_fixture_store();

    let err = store.find("").unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(_)));
    let err = store.find("   ").unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(_)));
}

#[test]
fn find_unknown_collection_is_a_hard_failure() {
    let (store, _out) = open_fixture_store();

    let err = store.find("a bad collection name").unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(name) if name == "a bad collection name"));
}

#[test]
fn add_creates_single_title_record() {
    let (mut store, _out) = open_fixture_store();
    let initial_len = store.find("tracks").unwrap().len();

    let result = store.add("tracks", "5", "Original Faubus Fables");
    assert_eq!(result.status, Status::Ok);

    let tracks = store.find("tracks").unwrap();
    assert!(tracks.contains(&Record::with_title("5", "Original Faubus Fables")));
    assert_eq!(tracks.len(), initial_len + 1);
}

#[test]
fn add_follows_create_rejection_rules() {
    let (mut store, _out) = open_fixture_store();

    assert_eq!(store.add("tracks", "", "Nameless").status, Status::Error);
    assert_eq!(store.add("tracks", "1", "Duplicate").status, Status::Error);
    assert_eq!(store.add("albums", "9", "Unknown").status, Status::Error);
    assert_eq!(store.find("tracks").unwrap().len(), 2);
}
