//! Engine lifecycle: readiness, skipped documents, failed rebuilds.

use super::common::{cat_pages, engine_with, page, pet_pages, urls};
use lexis::{
    DocumentSource, EngineConfig, Error, MemorySource, Result, SearchEngine, SourceBatch,
};

/// A source whose backing store is down.
struct Unavailable;

impl DocumentSource for Unavailable {
    fn describe(&self) -> String {
        "unavailable".to_string()
    }

    fn fetch(&self) -> Result<SourceBatch> {
        Err(Error::SourceUnavailable("connection refused".to_string()))
    }
}

#[test]
fn test_query_before_first_commit_is_not_ready() {
    let engine = SearchEngine::new(EngineConfig::default()).unwrap();
    assert!(!engine.is_ready());
    assert!(matches!(engine.query("cat"), Err(Error::IndexNotReady)));
}

#[test]
fn test_empty_query_is_an_error_even_when_ready() {
    let engine = engine_with(cat_pages());
    assert!(matches!(engine.query(""), Err(Error::QuerySyntax { .. })));
}

#[test]
fn test_bad_documents_are_skipped_not_fatal() {
    let engine = SearchEngine::new(EngineConfig::default()).unwrap();
    let source = MemorySource::new(vec![
        page("", "", ""),
        page("a.com/1", "Doc 1", "the cat sat"),
        page("", "", "   "),
        page("a.com/2", "Doc 2", "the cat cat cat"),
    ]);

    let report = engine.rebuild(&source).unwrap();
    assert_eq!(report.indexed, 2);
    assert_eq!(report.skipped, 2);
    let positions: Vec<usize> = report.failures.iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![0, 2]);

    // Skipped pages consume no docIDs.
    let response = engine.query("cat").unwrap();
    let ids: Vec<u32> = response.hits.iter().map(|h| h.doc_id.0).collect();
    assert_eq!(ids, vec![1, 0]);
}

#[test]
fn test_stop_word_only_page_is_indexed() {
    let engine = SearchEngine::new(EngineConfig::default()).unwrap();
    let report = engine
        .rebuild(&MemorySource::new(vec![
            page("", "", "the and of"),
            page("a.com/cat", "", "the cat"),
        ]))
        .unwrap();
    assert_eq!(report.indexed, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(engine.snapshot().unwrap().doc_count(), 2);
    assert_eq!(urls(&engine, "cat"), vec!["a.com/cat"]);
    assert!(urls(&engine, "the").is_empty());
}

#[test]
fn test_unavailable_source_keeps_serving_last_snapshot() {
    let engine = engine_with(cat_pages());
    let before = urls(&engine, "cat");

    assert!(matches!(
        engine.rebuild(&Unavailable),
        Err(Error::SourceUnavailable(_))
    ));
    assert_eq!(urls(&engine, "cat"), before);
    assert_eq!(engine.query("cat").unwrap().generation, 1);

    // The failed rebuild released the writer.
    let report = engine.rebuild(&MemorySource::new(pet_pages())).unwrap();
    assert_eq!(report.generation, 2);
}

#[test]
fn test_rebuild_replaces_everything() {
    let engine = engine_with(cat_pages());
    engine.rebuild(&MemorySource::new(pet_pages())).unwrap();

    assert!(urls(&engine, "sat").is_empty());
    assert_eq!(urls(&engine, "cat"), vec!["pets.com/cats", "pets.com/both"]);
    assert_eq!(engine.snapshot().unwrap().doc_count(), 5);
}

#[test]
fn test_rebuild_with_no_pages_serves_empty_index() {
    let engine = engine_with(cat_pages());
    let report = engine.rebuild(&MemorySource::default()).unwrap();
    assert_eq!(report.indexed, 0);
    assert!(engine.is_ready());
    assert!(engine.query("cat").unwrap().is_empty());
}

#[test]
fn test_second_build_rejected_while_one_is_open() {
    let engine = engine_with(cat_pages());
    let session = engine.writer().begin_build().unwrap();
    assert!(engine.writer().is_building());

    assert!(matches!(
        engine.rebuild(&MemorySource::new(pet_pages())),
        Err(Error::BuildInProgress)
    ));
    assert!(matches!(
        engine.writer().begin_build(),
        Err(Error::BuildInProgress)
    ));

    drop(session);
    assert!(!engine.writer().is_building());
    engine.rebuild(&MemorySource::new(pet_pages())).unwrap();
}

#[test]
fn test_console_preset() {
    let config = EngineConfig::console();
    assert_eq!(config.top_k, 30);
    assert_eq!(config.preview_length, 30);

    let long = "cat ".repeat(40);
    let engine = super::common::engine_with_config(config, vec![page("a.com/long", "", &long)]);
    let hit = &engine.query("cat").unwrap().hits[0];
    assert_eq!(hit.preview.chars().count(), 30);
}
