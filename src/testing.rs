// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplicating them in every test.

#![doc(hidden)]

use std::sync::Arc;

use crate::analysis::AnalyzerRegistry;
use crate::document::{Document, Field, WebPage};
use crate::index::{Snapshot, SnapshotSlot};
use crate::writer::IndexWriter;

/// Create a page.
pub fn page(url: &str, title: &str, html: &str) -> WebPage {
    WebPage::new(url, title, html)
}

/// The two-page corpus used throughout the docs: page 2 mentions "cat"
/// three times, page 1 once.
pub fn cat_pages() -> Vec<WebPage> {
    vec![
        page("a.com/1", "Doc 1", "the cat sat"),
        page("a.com/2", "Doc 2", "the cat cat cat"),
    ]
}

/// A handful of pages with distinct vocabulary per field, for boolean and
/// field-isolation tests.
pub fn pet_pages() -> Vec<WebPage> {
    vec![
        page("pets.com/cats", "All about cats", "cats purr and nap in the sun"),
        page("pets.com/dogs", "All about dogs", "dogs bark and fetch sticks"),
        page("pets.com/both", "Cats and dogs", "cats and dogs can share a home"),
        page("pets.com/birds", "Birds", "parrots talk and finches sing"),
        page("pets.com/fish", "Aquarium fish", "goldfish swim in clean water"),
    ]
}

/// `n` generated pages with a deterministic spread of term frequencies.
pub fn generated_pages(n: usize) -> Vec<WebPage> {
    const WORDS: [&str; 8] = [
        "rust", "search", "index", "query", "score", "token", "field", "commit",
    ];
    (0..n)
        .map(|i| {
            let body: Vec<&str> = (0..(5 + i % 17))
                .map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()])
                .collect();
            page(
                &format!("gen.com/{}", i),
                &format!("Page {} {}", i, WORDS[i % WORDS.len()]),
                &body.join(" "),
            )
        })
        .collect()
}

/// Commit one document per `html` text with the default analyzers and return
/// the resulting snapshot (generation 1).
pub fn snapshot_from_html(texts: &[&str]) -> Snapshot {
    let docs = texts
        .iter()
        .map(|text| Document::new().with_field(Field::text("html", *text)));
    commit_documents(docs)
}

/// Commit `docs` into a fresh slot with the default analyzers.
pub fn commit_documents(docs: impl IntoIterator<Item = Document>) -> Snapshot {
    let slot = SnapshotSlot::new();
    let writer = IndexWriter::new(Arc::new(AnalyzerRegistry::default()), slot);
    let mut session = writer.begin_build().expect("fresh writer has no build running");
    for doc in docs {
        let _ = session.add_document(doc);
    }
    let report = writer.commit(session).expect("commit of valid documents");
    (*report.snapshot).clone()
}
