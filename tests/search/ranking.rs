//! BM25 ranking through the full engine.

use super::common::{assert_ranked, cat_pages, engine_with, engine_with_config, generated_pages, page, pet_pages, query, urls};
use lexis::EngineConfig;

#[test]
fn test_more_occurrences_rank_first() {
    let engine = engine_with(cat_pages());

    let response = query(&engine, "html:cat");
    assert_eq!(response.total_hits, 2);
    assert_eq!(response.urls().collect::<Vec<_>>(), vec!["a.com/2", "a.com/1"]);
    assert_eq!(response.hits[0].title, "Doc 2");
    assert_eq!(response.hits[1].title, "Doc 1");
    assert!(response.hits[0].score > response.hits[1].score);
}

#[test]
fn test_bare_terms_use_default_field() {
    let engine = engine_with(cat_pages());
    assert_eq!(urls(&engine, "cat"), urls(&engine, "html:cat"));
}

#[test]
fn test_shorter_field_wins_at_equal_frequency() {
    // "cat" appears once in both pages; the cats page has fewer html terms.
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "cat"), vec!["pets.com/cats", "pets.com/both"]);
}

#[test]
fn test_frequency_monotonic_at_equal_length() {
    let engine = engine_with(vec![
        page("a.com/once", "", "cat dog dog"),
        page("a.com/twice", "", "cat cat dog"),
    ]);
    let response = query(&engine, "cat");
    assert_eq!(response.urls().collect::<Vec<_>>(), vec!["a.com/twice", "a.com/once"]);
}

#[test]
fn test_rarer_term_contributes_more() {
    // Both pages match one term each with equal frequency and length; the
    // term found in fewer pages scores higher.
    let engine = engine_with(vec![
        page("a.com/common", "", "apple pie"),
        page("a.com/rare", "", "quince pie"),
        page("a.com/other", "", "apple tart"),
    ]);
    let response = query(&engine, "apple quince");
    assert_eq!(response.hits[0].url, "a.com/rare");
    assert_ranked(&response);
}

#[test]
fn test_boost_reorders_tied_hits() {
    let engine = engine_with(pet_pages());

    // Equal scores: lower docID first.
    let tied = query(&engine, "purr bark");
    assert_eq!(tied.hits[0].score, tied.hits[1].score);
    assert_eq!(tied.urls().collect::<Vec<_>>(), vec!["pets.com/cats", "pets.com/dogs"]);

    let boosted = query(&engine, "purr bark^5");
    assert_eq!(boosted.urls().collect::<Vec<_>>(), vec!["pets.com/dogs", "pets.com/cats"]);
    assert!((boosted.hits[0].score - 5.0 * tied.hits[1].score).abs() < 1e-9);
}

#[test]
fn test_field_boost_from_config() {
    let plain = engine_with(pet_pages());
    let boosted = engine_with_config(EngineConfig::default().with_field_boost("title", 3.0), pet_pages());

    let before = query(&plain, "title:cat");
    let after = query(&boosted, "title:cat");
    assert_eq!(before.urls().collect::<Vec<_>>(), after.urls().collect::<Vec<_>>());
    assert!((after.hits[0].score - 3.0 * before.hits[0].score).abs() < 1e-9);
}

#[test]
fn test_top_k_truncates_but_counts_everything() {
    let engine = engine_with_config(EngineConfig::default().with_top_k(3), generated_pages(50));
    let response = query(&engine, "rust");
    assert_eq!(response.hits.len(), 3);
    assert!(response.total_hits > 3);
    assert_ranked(&response);
}

#[test]
fn test_preview_is_truncated_by_characters() {
    let engine = engine_with_config(EngineConfig::default().with_preview_length(7), cat_pages());
    let response = query(&engine, "cat");
    assert_eq!(response.hits[0].preview, "the cat");

    let engine = engine_with_config(
        EngineConfig::default().with_preview_length(4),
        vec![page("a.com/u", "", "héllo wörld")],
    );
    assert_eq!(query(&engine, "héllo").hits[0].preview, "héll");
}

#[test]
fn test_short_preview_kept_whole() {
    let engine = engine_with(cat_pages());
    let response = query(&engine, "cat");
    assert_eq!(response.hits[0].preview, "the cat cat cat");
}

#[test]
fn test_empty_index_returns_no_hits() {
    let engine = engine_with(Vec::new());
    let response = query(&engine, "cat");
    assert!(response.is_empty());
    assert_eq!(response.total_hits, 0);
}
