// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean matching and BM25 ranking over one snapshot.
//!
//! # Algorithm
//!
//! ```text
//! for each clause:
//!     postings = snapshot[field][term]        (missing → empty, not an error)
//!     MUST_NOT → add every doc to the excluded set
//!     otherwise → for each posting: score += boost · bm25(tf, len)
//!                                   count the MUST / SHOULD hit
//!
//! match(doc) = all MUST clauses hit
//!            ∧ no MUST_NOT clause hit
//!            ∧ (at least one SHOULD hit, if there are no MUST clauses)
//! ```
//!
//! Matching docs go through a bounded top-k heap; ties are broken by ascending
//! docID so the same snapshot and query always produce the same ranking.

mod collector;
mod scorer;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::trace;

pub use collector::TopKCollector;
pub use scorer::{idf, TermScorer};

use crate::config::Bm25Params;
use crate::index::Snapshot;
use crate::query::{BooleanQuery, Occur};
use crate::types::{DocId, ScoredDoc, TopDocs};

#[derive(Debug, Default, Clone, Copy)]
struct Candidate {
    score: f64,
    must_hits: usize,
    should_hits: usize,
}

/// Runs queries against the snapshot it was created with.
///
/// Holding a `Searcher` keeps its snapshot alive even after a newer commit
/// replaces it, so a long search always sees one consistent index.
#[derive(Debug, Clone)]
pub struct Searcher {
    snapshot: Arc<Snapshot>,
    bm25: Bm25Params,
}

impl Searcher {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self::with_params(snapshot, Bm25Params::default())
    }

    pub fn with_params(snapshot: Arc<Snapshot>, bm25: Bm25Params) -> Self {
        Self { snapshot, bm25 }
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// The best `top_k` matches, best first.
    pub fn search(&self, query: &BooleanQuery, top_k: usize) -> Vec<ScoredDoc> {
        self.top_docs(query, top_k).hits
    }

    /// Like `search`, plus the number of documents that matched in total.
    pub fn top_docs(&self, query: &BooleanQuery, top_k: usize) -> TopDocs {
        let doc_count = self.snapshot.doc_count();
        if doc_count == 0 || !query.has_positive_clauses() {
            return TopDocs::default();
        }

        let required = query.by_occur(Occur::Must).count();
        let mut candidates: HashMap<DocId, Candidate> = HashMap::new();
        let mut excluded: HashSet<DocId> = HashSet::new();

        for clause in query.clauses() {
            let Some(field) = self.snapshot.field(&clause.field) else {
                continue;
            };
            let Some(postings) = field.postings(&clause.term) else {
                continue;
            };

            if clause.occur == Occur::MustNot {
                excluded.extend(postings.iter().map(|p| p.doc_id));
                continue;
            }

            let scorer = TermScorer::new(
                self.bm25,
                idf(doc_count, postings.doc_freq),
                field.average_length(),
                clause.boost,
            );
            for posting in postings {
                let candidate = candidates.entry(posting.doc_id).or_default();
                let length = field.field_length(posting.doc_id);
                candidate.score += scorer.score(posting.term_freq, length);
                match clause.occur {
                    Occur::Must => candidate.must_hits += 1,
                    Occur::Should => candidate.should_hits += 1,
                    Occur::MustNot => {}
                }
            }
        }

        let mut collector = TopKCollector::new(top_k);
        for (doc_id, candidate) in candidates {
            let matches = candidate.must_hits == required
                && !excluded.contains(&doc_id)
                && (required > 0 || candidate.should_hits > 0);
            if matches {
                collector.collect(ScoredDoc::new(doc_id, candidate.score));
            }
        }

        let total_hits = collector.seen();
        let hits = collector.into_sorted_vec();
        trace!(query = %query, total_hits, returned = hits.len(), "scored query");
        TopDocs { total_hits, hits }
    }
}
