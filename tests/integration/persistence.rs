//! Snapshots written to disk and loaded back by a new engine.

use std::fs;

use super::common::{cat_pages, pet_pages, urls};
use lexis::binary::{decode_snapshot, encode_snapshot};
use lexis::{EngineConfig, Error, MemorySource, SearchEngine, SnapshotStore};

#[test]
fn test_committed_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.lexis");
    let config = EngineConfig::default().with_index_path(&path);

    let first = SearchEngine::new(config.clone()).unwrap();
    first.rebuild(&MemorySource::new(cat_pages())).unwrap();
    let before = first.query("cat").unwrap();

    let second = SearchEngine::new(config).unwrap();
    assert!(second.is_ready());
    assert_eq!(second.query("cat").unwrap(), before);
}

#[test]
fn test_generation_continues_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().with_index_path(dir.path().join("index.lexis"));

    let first = SearchEngine::new(config.clone()).unwrap();
    first.rebuild(&MemorySource::new(cat_pages())).unwrap();
    first.rebuild(&MemorySource::new(cat_pages())).unwrap();

    let second = SearchEngine::new(config).unwrap();
    let report = second.rebuild(&MemorySource::new(pet_pages())).unwrap();
    assert_eq!(report.generation, 3);
}

#[test]
fn test_missing_file_means_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default().with_index_path(dir.path().join("absent.lexis"));
    let engine = SearchEngine::new(config).unwrap();
    assert!(matches!(engine.query("cat"), Err(Error::IndexNotReady)));
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("index.lexis");
    let engine = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();
    engine.rebuild(&MemorySource::new(cat_pages())).unwrap();

    let names: Vec<String> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["index.lexis"]);
}

#[test]
fn test_corrupt_file_is_ignored_until_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.lexis");
    let config = EngineConfig::default().with_index_path(&path);
    let engine = SearchEngine::new(config.clone()).unwrap();
    engine.rebuild(&MemorySource::new(cat_pages())).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    let restarted = SearchEngine::new(config.clone()).unwrap();
    assert!(!restarted.is_ready());
    assert!(matches!(restarted.query("cat"), Err(Error::IndexNotReady)));
    assert_eq!(fs::read(&path).unwrap(), bytes);

    let report = restarted.rebuild(&MemorySource::new(cat_pages())).unwrap();
    assert_eq!(report.generation, 1);
    assert!(!urls(&restarted, "cat").is_empty());
    assert!(decode_snapshot(&fs::read(&path).unwrap()).is_ok());
    assert!(SearchEngine::new(config).unwrap().is_ready());
}

#[test]
fn test_garbage_file_is_replaced_by_next_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.lexis");
    fs::write(&path, b"not a lexis index!").unwrap();

    let engine = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();
    assert!(!engine.is_ready());

    engine.rebuild(&MemorySource::new(pet_pages())).unwrap();
    assert_eq!(urls(&engine, "parrot").len(), 1);
    let reloaded = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();
    assert_eq!(urls(&reloaded, "parrot"), urls(&engine, "parrot"));
}

#[test]
fn test_failed_save_keeps_serving_previous_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.lexis");
    let engine = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();
    engine.rebuild(&MemorySource::new(cat_pages())).unwrap();
    let before = engine.query("cat").unwrap();
    let bytes = fs::read(&path).unwrap();

    // A directory where the temp file goes makes the write fail.
    let temp = dir.path().join("index.lexis.tmp");
    fs::create_dir(&temp).unwrap();
    let result = engine.rebuild(&MemorySource::new(pet_pages()));
    assert!(matches!(result, Err(Error::Io(_))));

    assert_eq!(engine.query("cat").unwrap(), before);
    assert_eq!(engine.snapshot().unwrap().generation(), 1);
    assert_eq!(fs::read(&path).unwrap(), bytes);
    assert!(!engine.writer().is_building());

    fs::remove_dir(&temp).unwrap();
    let report = engine.rebuild(&MemorySource::new(pet_pages())).unwrap();
    assert_eq!(report.generation, 2);
}

#[test]
fn test_store_round_trips_snapshot() {
    let engine = SearchEngine::new(EngineConfig::default()).unwrap();
    engine.rebuild(&MemorySource::new(pet_pages())).unwrap();
    let snapshot = engine.snapshot().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("pets.lexis"));
    store.save(&snapshot).unwrap();
    let loaded = store.load().unwrap().unwrap();

    assert_eq!(encode_snapshot(&loaded).unwrap(), encode_snapshot(&snapshot).unwrap());
    assert_eq!(loaded.generation(), snapshot.generation());
    assert_eq!(loaded.doc_count(), 5);
}

#[test]
fn test_truncated_bytes_fail_to_decode() {
    let engine = SearchEngine::new(EngineConfig::default()).unwrap();
    engine.rebuild(&MemorySource::new(cat_pages())).unwrap();
    let bytes = encode_snapshot(&engine.snapshot().unwrap()).unwrap();

    for len in [0, 10, bytes.len() / 2, bytes.len() - 1] {
        assert!(decode_snapshot(&bytes[..len]).is_err(), "prefix of {} bytes", len);
    }
}

#[test]
fn test_file_queries_match_memory_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.lexis");
    let on_disk = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();
    on_disk.rebuild(&MemorySource::new(pet_pages())).unwrap();
    let reloaded = SearchEngine::new(EngineConfig::default().with_index_path(&path)).unwrap();

    let in_memory = super::common::engine_with(pet_pages());
    for q in ["cat", "+cat -dog", "title:cat", "url:pets.com/fish", "parrot goldfish"] {
        assert_eq!(urls(&reloaded, q), urls(&in_memory, q), "query {:?}", q);
    }
}
