// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 Okapi.
//!
//! ```text
//! idf(t)   = ln(1 + (N - n_t + 0.5) / (n_t + 0.5))
//! score    = idf(t) · tf·(k1 + 1) / (tf + k1·(1 - b + b·len/avg_len))
//! ```
//!
//! `N` is every document in the snapshot, `n_t` the documents containing `t`
//! in the clause's field. The `1 +` inside the log keeps idf positive even for
//! terms in more than half the documents.

use crate::config::Bm25Params;

/// Inverse document frequency. Always > 0 for `doc_freq <= doc_count`.
#[inline]
pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    let n = doc_count as f64;
    let n_t = doc_freq as f64;
    (1.0 + (n - n_t + 0.5) / (n_t + 0.5)).ln()
}

/// Per-term scoring with idf and length normalization fixed for one clause.
#[derive(Debug, Clone, Copy)]
pub struct TermScorer {
    params: Bm25Params,
    idf: f64,
    average_length: f64,
    boost: f64,
}

impl TermScorer {
    pub fn new(params: Bm25Params, idf: f64, average_length: f64, boost: f64) -> Self {
        Self {
            params,
            idf,
            average_length,
            boost,
        }
    }

    /// Boosted contribution of one posting.
    #[inline]
    pub fn score(&self, term_freq: u32, field_length: u32) -> f64 {
        let Bm25Params { k1, b } = self.params;
        let tf = f64::from(term_freq);
        // A field that is empty in every document has no postings, so this
        // only guards division by zero for malformed snapshots.
        let relative_length = if self.average_length > 0.0 {
            f64::from(field_length) / self.average_length
        } else {
            1.0
        };
        let norm = tf + k1 * (1.0 - b + b * relative_length);
        self.boost * self.idf * (tf * (k1 + 1.0)) / norm
    }
}
