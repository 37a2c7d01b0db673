use chrono::NaiveDate;
use daylist_core::{JsonFileStore, StoreError, TodoItem, TodoStore};
use std::fs;

fn completed_item(text: &str) -> TodoItem {
    let at = NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|date| date.and_hms_micro_opt(10, 15, 0, 250_000))
        .unwrap();
    let mut item = TodoItem::new(text).unwrap();
    item.mark_completed(at);
    item
}

#[test]
fn missing_file_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("todo_data.json"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn empty_file_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, "  \n").unwrap();

    assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
}

#[test]
fn unparseable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(&path, "{not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[
            {"id": "11111111-2222-4333-8444-555555555555", "text": "a", "completed": false, "timestamp": null},
            {"id": "11111111-2222-4333-8444-555555555555", "text": "b", "completed": false, "timestamp": null}
        ]"#,
    )
    .unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("todo_data.json"));
    let items = vec![
        TodoItem::new("first").unwrap(),
        completed_item("second"),
        TodoItem::new("third").unwrap(),
    ];

    store.save(&items).unwrap();
    assert_eq!(store.load().unwrap(), items);
}

#[test]
fn resaving_loaded_document_reproduces_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("todo_data.json"));
    store
        .save(&[TodoItem::new("alpha").unwrap(), completed_item("beta")])
        .unwrap();
    let first: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

    let loaded = store.load().unwrap();
    store.save(&loaded).unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn legacy_document_without_ids_loads_and_gains_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[{"text": "buy milk", "completed": false, "timestamp": null}, {"text": "call mom", "completed": true, "timestamp": "2026-10-18T08:00:00.000001"}]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    let items = store.load().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text(), "buy milk");
    assert!(items[1].is_completed());

    store.save(&items).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let records = raw.as_array().unwrap();
    assert_eq!(records[0]["id"], items[0].id().to_string());
    assert_eq!(records[1]["timestamp"], "2026-10-18T08:00:00.000001");
}

#[test]
fn save_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("todo_data.json");
    let store = JsonFileStore::new(&path);

    store.save(&[TodoItem::new("x").unwrap()]).unwrap();
    assert!(path.exists());
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("todo_data.json"));

    store.save(&[TodoItem::new("x").unwrap()]).unwrap();
    store.save(&[]).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
}

#[test]
fn save_into_unwritable_location_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();
    let store = JsonFileStore::new(blocker.join("todo_data.json"));

    let err = store.save(&[]).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn legacy_document_with_whitespace_only_item_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_data.json");
    fs::write(
        &path,
        r#"[{"text": "buy milk", "completed": false, "timestamp": null}, {"text": "  ", "completed": false, "timestamp": null}]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    let items = store.load().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text(), "buy milk");
    assert_eq!(items[1].text(), "  ");

    store.save(&items).unwrap();
    assert_eq!(store.load().unwrap(), items);
}
