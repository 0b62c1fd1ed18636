//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lexis::{EngineConfig, MemorySource, QueryResponse, SearchEngine, WebPage, MANIFEST_FILE};

// Re-export canonical test utilities from lexis::testing
pub use lexis::testing::{cat_pages, generated_pages, page, pet_pages};

// ============================================================================
// ENGINES
// ============================================================================

/// An engine with the default configuration that has committed `pages`.
pub fn engine_with(pages: Vec<WebPage>) -> SearchEngine {
    engine_with_config(EngineConfig::default(), pages)
}

pub fn engine_with_config(config: EngineConfig, pages: Vec<WebPage>) -> SearchEngine {
    let engine = SearchEngine::new(config).expect("valid config");
    engine
        .rebuild(&MemorySource::new(pages))
        .expect("rebuild from memory");
    engine
}

/// Run `query` and panic with the query in the message if it fails.
pub fn query(engine: &SearchEngine, query: &str) -> QueryResponse {
    engine
        .query(query)
        .unwrap_or_else(|e| panic!("query {:?} failed: {}", query, e))
}

/// Ranked URLs for `query`.
pub fn urls(engine: &SearchEngine, q: &str) -> Vec<String> {
    query(engine, q).urls().map(str::to_string).collect()
}

/// What a response looks like independent of which generation served it.
pub fn ranking_of(response: &QueryResponse) -> (usize, Vec<String>) {
    (
        response.total_hits,
        response.urls().map(str::to_string).collect(),
    )
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Scores never increase down the list; ties are broken by ascending docID.
pub fn assert_ranked(response: &QueryResponse) {
    for pair in response.hits.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.score > b.score || (a.score == b.score && a.doc_id < b.doc_id),
            "hits out of order: {:?} before {:?}",
            a,
            b
        );
    }
    assert!(response.hits.len() <= response.total_hits);
}

// ============================================================================
// CRAWL DIRECTORIES
// ============================================================================

/// Write `pages` as a manifest directory under `dir`.
pub fn write_crawl(dir: &Path, pages: &[WebPage]) {
    let mut files = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let file = format!("{}.json", i);
        fs::write(dir.join(&file), serde_json::to_string(page).unwrap()).unwrap();
        files.push(file);
    }
    let manifest = serde_json::json!({ "version": 1, "documents": files });
    fs::write(dir.join(MANIFEST_FILE), manifest.to_string()).unwrap();
}
