// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for end-to-end queries.
//!
//! Arbitrary query strings against a small fixed corpus: never panic, never
//! return more than `top_k` hits, always rank order, only valid docIDs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexis::testing::generated_pages;
use lexis::{EngineConfig, MemorySource, SearchEngine};

const TOP_K: usize = 10;

fuzz_target!(|query: &str| {
    static ENGINE: std::sync::OnceLock<SearchEngine> = std::sync::OnceLock::new();
    let engine = ENGINE.get_or_init(|| {
        let engine = SearchEngine::new(EngineConfig::default().with_top_k(TOP_K))
            .expect("default config is valid");
        engine
            .rebuild(&MemorySource::new(generated_pages(64)))
            .expect("rebuild from memory");
        engine
    });

    let query = query.char_indices().nth(200).map_or(query, |(end, _)| &query[..end]);
    let Ok(response) = engine.query(query) else {
        return;
    };

    assert!(response.hits.len() <= TOP_K);
    assert!(response.hits.len() <= response.total_hits);
    assert!(response.total_hits <= 64);
    for pair in response.hits.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id),
            "out of order: {:?}",
            pair
        );
    }
    for hit in &response.hits {
        assert!(hit.doc_id.as_usize() < 64);
        assert!(hit.score.is_finite() && hit.score > 0.0);
    }
});
