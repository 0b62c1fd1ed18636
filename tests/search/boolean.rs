//! Required, optional and excluded clauses.

use super::common::{engine_with, engine_with_config, pet_pages, query, urls};
use lexis::{DefaultOperator, EngineConfig, Error};

#[test]
fn test_must_not_excludes() {
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "+cat -dog"), vec!["pets.com/cats"]);
    assert_eq!(urls(&engine, "cat -dog"), vec!["pets.com/cats"]);
}

#[test]
fn test_all_musts_required() {
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "+cat +dog"), vec!["pets.com/both"]);
}

#[test]
fn test_shoulds_union_and_accumulate() {
    let engine = engine_with(pet_pages());
    let response = query(&engine, "cat dog");
    assert_eq!(response.total_hits, 3);
    assert_eq!(response.hits[0].url, "pets.com/both");
}

#[test]
fn test_should_does_not_widen_required_set() {
    let engine = engine_with(pet_pages());
    let response = query(&engine, "+cat bark");
    assert_eq!(response.total_hits, 2);
    assert!(response.urls().all(|u| u != "pets.com/dogs"));
}

#[test]
fn test_only_exclusions_match_nothing() {
    let engine = engine_with(pet_pages());
    let response = query(&engine, "-cat");
    assert!(response.is_empty());
    assert_eq!(response.total_hits, 0);
}

#[test]
fn test_missing_required_term_matches_nothing() {
    let engine = engine_with(pet_pages());
    assert!(urls(&engine, "+cat +zebra").is_empty());
    assert_eq!(urls(&engine, "cat zebra").len(), 2);
}

#[test]
fn test_and_operator_requires_bare_terms() {
    let config = EngineConfig::default().with_default_operator(DefaultOperator::And);
    let engine = engine_with_config(config, pet_pages());
    assert_eq!(urls(&engine, "cat dog"), vec!["pets.com/both"]);
    assert_eq!(urls(&engine, "cat -dog"), vec!["pets.com/cats"]);
}

#[test]
fn test_stop_words_vanish_from_queries() {
    let engine = engine_with(pet_pages());
    assert!(query(&engine, "the").is_empty());
    assert_eq!(urls(&engine, "+the cat"), urls(&engine, "cat"));
}

#[test]
fn test_malformed_queries_are_syntax_errors() {
    let engine = engine_with(pet_pages());
    for bad in ["", "   ", "+", "cat -", "title:", ":cat", "cat^x", "cat^-1"] {
        assert!(
            matches!(engine.query(bad), Err(Error::QuerySyntax { .. })),
            "{:?} should not parse",
            bad
        );
    }
}

#[test]
fn test_syntax_error_reports_position() {
    let engine = engine_with(pet_pages());
    match engine.query("cat title:") {
        Err(Error::QuerySyntax { position, .. }) => assert_eq!(position, 10),
        other => panic!("expected syntax error, got {:?}", other),
    }
}
