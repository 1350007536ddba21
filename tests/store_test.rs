//! テイスティング記録ファイルストアのテスト

use tempfile::tempdir;
use top100_common::selection::{KeyValueStore, SelectionManager, TastingStatus, STORAGE_KEY};
use top100_rust::store::FileStore;

#[test]
fn test_missing_file_reads_none() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("record.json"));
    assert!(store.read(STORAGE_KEY).is_none());
}

#[test]
fn test_write_creates_parent_dirs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("record.json");
    let mut store = FileStore::new(&path);

    store.write("a", "1").expect("書き込み失敗");
    store.write("b", "2").expect("書き込み失敗");

    assert!(path.exists());
    assert_eq!(store.read("a").as_deref(), Some("1"));
    assert_eq!(store.read("b").as_deref(), Some("2"));
}

#[test]
fn test_corrupt_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("record.json");
    std::fs::write(&path, "not json at all").unwrap();

    let manager = SelectionManager::load(FileStore::new(&path));
    assert!(manager.selection().is_empty(), "壊れたファイルは空として扱う");
}

#[test]
fn test_corrupt_value_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("record.json");
    std::fs::write(&path, r#"{"tastingRecord": "{broken"}"#).unwrap();

    let manager = SelectionManager::load(FileStore::new(&path));
    assert!(manager.selection().is_empty());
}

#[test]
fn test_selection_survives_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("record.json");

    {
        let mut manager = SelectionManager::load(FileStore::new(&path));
        manager.set_status("12", Some(TastingStatus::Tasted)).expect("保存失敗");
        manager.set_status("40", Some(TastingStatus::Want)).expect("保存失敗");
        manager.set_status("12", None).expect("保存失敗");
    }

    let manager = SelectionManager::load(FileStore::new(&path));
    assert_eq!(manager.selection().len(), 1);
    assert_eq!(manager.selection().get("40"), Some(TastingStatus::Want));
    assert_eq!(manager.selection().get("12"), None);
}
