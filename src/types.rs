// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the index.
//!
//! Documents are addressed by a dense `DocId` assigned in insertion order
//! during a build. Postings point at documents by that id, and scored results
//! carry it back out to result assembly.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **PostingList**: postings sorted strictly ascending by `doc_id`, and
//!   `doc_freq == postings.len()`. A term that occurs twice in one document
//!   gets one posting with `term_freq == 2`, never two postings.
//!
//! - **Posting**: `doc_id < snapshot.doc_count()` and `term_freq >= 1`.
//!
//! - **ScoredDoc ordering**: "greater" means "ranks higher": larger score
//!   first, then smaller `doc_id`. The top-k collector depends on this being
//!   a total order, which is why scores are wrapped in `OrderedFloat`.
//!
//! `Snapshot::validate()` in `verify` checks all of these after a commit and
//! after loading a persisted snapshot.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Dense, zero-based, assigned in insertion order by a `WriteSession`. Only
/// meaningful relative to the snapshot that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// POSTINGS
// =============================================================================

/// One document's occurrence record for a term in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// How many times the term occurs in this document's field. Always >= 1.
    pub term_freq: u32,
}

/// All documents containing a term in one field, ordered by `doc_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    pub postings: Vec<Posting>,
    /// Number of distinct documents containing the term (`n_t` in BM25).
    pub doc_freq: usize,
}

impl PostingList {
    /// Build from postings that may be out of order. Sorts by `doc_id` and
    /// sets `doc_freq`.
    pub fn from_unsorted(mut postings: Vec<Posting>) -> Self {
        postings.sort_unstable_by_key(|p| p.doc_id);
        let doc_freq = postings.len();
        Self { postings, doc_freq }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Term frequency for `doc_id`, if the document is in this list.
    pub fn term_freq(&self, doc_id: DocId) -> Option<u32> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| self.postings[i].term_freq)
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

// =============================================================================
// SCORED RESULTS
// =============================================================================

/// A document and its relevance score for one query.
///
/// **Gotcha**: `Ord` is rank order, not field order. `a > b` means `a` ranks
/// above `b`: higher score, or equal score and lower `doc_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

impl ScoredDoc {
    pub fn new(doc_id: DocId, score: f64) -> Self {
        Self { doc_id, score }
    }
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score)
            .cmp(&OrderedFloat(other.score))
            .then_with(|| other.doc_id.cmp(&self.doc_id))
    }
}

/// Ranked hits plus the number of documents that matched before truncation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDocs {
    pub total_hits: usize,
    pub hits: Vec<ScoredDoc>,
}
