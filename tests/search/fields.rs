//! Field qualifiers, field isolation and stored values.

use super::common::{engine_with, engine_with_config, pet_pages, query, urls};
use lexis::{EngineConfig, FieldConfig};

#[test]
fn test_field_qualifier_searches_only_that_field() {
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "html:bark"), vec!["pets.com/dogs"]);
    assert!(urls(&engine, "title:bark").is_empty());
}

#[test]
fn test_title_field_has_its_own_statistics() {
    // "Cats and dogs" has two title terms, "All about cats" three.
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "title:cat"), vec!["pets.com/both", "pets.com/cats"]);
}

#[test]
fn test_unknown_field_matches_nothing() {
    let engine = engine_with(pet_pages());
    let response = query(&engine, "nosuch:cat");
    assert!(response.is_empty());
    assert_eq!(response.total_hits, 0);
    assert_eq!(urls(&engine, "nosuch:cat dog").len(), 2);
}

#[test]
fn test_url_is_matched_as_one_keyword() {
    let engine = engine_with(pet_pages());
    assert_eq!(urls(&engine, "url:pets.com/fish"), vec!["pets.com/fish"]);
    assert!(urls(&engine, "url:fish").is_empty());
}

#[test]
fn test_default_field_is_configurable() {
    let config = EngineConfig::default().with_default_field("title");
    let engine = engine_with_config(config, pet_pages());
    assert_eq!(urls(&engine, "aquarium"), vec!["pets.com/fish"]);
    assert!(urls(&engine, "goldfish").is_empty());
    assert_eq!(urls(&engine, "html:goldfish"), vec!["pets.com/fish"]);
}

#[test]
fn test_stored_only_field_is_not_searchable() {
    let mut config = EngineConfig::default();
    config.fields = vec![
        FieldConfig::keyword("url"),
        FieldConfig {
            indexed: false,
            ..FieldConfig::text("title")
        },
        FieldConfig::text("html"),
    ];
    let engine = engine_with_config(config, pet_pages());

    assert!(urls(&engine, "title:aquarium").is_empty());
    let response = query(&engine, "goldfish");
    assert_eq!(response.hits[0].title, "Aquarium fish");
}

#[test]
fn test_hits_carry_stored_values() {
    let engine = engine_with(pet_pages());
    let hit = &query(&engine, "parrot").hits[0];
    assert_eq!(hit.url, "pets.com/birds");
    assert_eq!(hit.title, "Birds");
    assert_eq!(hit.preview, "parrots talk and finches sing");
}
