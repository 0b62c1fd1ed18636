// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the query parser.
//!
//! Any string is either a query or a syntax error with an in-bounds position.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use lexis::{AnalyzerRegistry, EngineConfig, Error, QueryParser};

fuzz_target!(|input: &str| {
    static PARSER: std::sync::OnceLock<QueryParser> = std::sync::OnceLock::new();
    let parser = PARSER.get_or_init(|| {
        QueryParser::new(&EngineConfig::default(), Arc::new(AnalyzerRegistry::default()))
    });

    match parser.parse(input) {
        Ok(query) => {
            for clause in query.clauses() {
                assert!(!clause.term.is_empty(), "empty term in {:?}", query);
                assert!(!clause.field.is_empty(), "empty field in {:?}", query);
                assert!(clause.boost.is_finite() && clause.boost >= 0.0);
            }
        }
        Err(Error::QuerySyntax { position, .. }) => assert!(position <= input.len()),
        Err(other) => panic!("parser returned a non-syntax error: {}", other),
    }
});
