//! Same input, same output: repeated queries, repeated rebuilds and tie order.

use super::common::{assert_ranked, engine_with, generated_pages, query, ranking_of};
use lexis::MemorySource;

const QUERIES: [&str; 6] = [
    "rust",
    "search index",
    "+query score",
    "token -field",
    "title:page commit",
    "+rust +search -token",
];

#[test]
fn test_repeated_queries_are_identical() {
    let engine = engine_with(generated_pages(120));
    for q in QUERIES {
        assert_eq!(query(&engine, q), query(&engine, q), "query {:?}", q);
    }
}

#[test]
fn test_rebuild_from_same_source_is_idempotent() {
    let engine = engine_with(generated_pages(120));
    let before: Vec<_> = QUERIES.iter().map(|q| query(&engine, q)).collect();

    let report = engine
        .rebuild(&MemorySource::new(generated_pages(120)))
        .unwrap();
    assert_eq!(report.generation, 2);

    for (q, old) in QUERIES.iter().zip(&before) {
        let new = query(&engine, q);
        assert_eq!(new.generation, 2);
        assert_eq!(ranking_of(&new), ranking_of(old), "query {:?}", q);
        let old_scores: Vec<f64> = old.hits.iter().map(|h| h.score).collect();
        let new_scores: Vec<f64> = new.hits.iter().map(|h| h.score).collect();
        assert_eq!(old_scores, new_scores);
    }
}

#[test]
fn test_ties_break_by_doc_id() {
    let engine = engine_with(generated_pages(120));
    for q in QUERIES {
        assert_ranked(&query(&engine, q));
    }
}
