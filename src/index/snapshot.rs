// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot layout.
//!
//! ```text
//! Snapshot
//! ├── fields: field → FieldIndex
//! │     ├── terms:   term → PostingList (sorted by doc_id)
//! │     ├── lengths: doc_id → token count in this field (0 if absent)
//! │     └── average_length: total tokens / doc_count
//! └── stored: doc_id → StoredDocument (stored field values, verbatim)
//! ```
//!
//! `lengths` and `stored` are dense: both have exactly `doc_count` entries.
//! The average is over all documents, including those without the field.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::types::{DocId, PostingList};

/// Postings and length statistics for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldIndex {
    pub(crate) terms: HashMap<String, PostingList>,
    pub(crate) lengths: Vec<u32>,
    pub(crate) total_length: u64,
    pub(crate) average_length: f64,
}

impl FieldIndex {
    /// Assemble from finished parts. `lengths` must already be dense.
    pub(crate) fn new(terms: HashMap<String, PostingList>, lengths: Vec<u32>) -> Self {
        let total_length: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
        let average_length = if lengths.is_empty() {
            0.0
        } else {
            total_length as f64 / lengths.len() as f64
        };
        Self {
            terms,
            lengths,
            total_length,
            average_length,
        }
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Token count of this field in `doc_id`; 0 when the document lacks it.
    pub fn field_length(&self, doc_id: DocId) -> u32 {
        self.lengths.get(doc_id.as_usize()).copied().unwrap_or(0)
    }

    /// Mean token count across every document in the snapshot.
    pub fn average_length(&self) -> f64 {
        self.average_length
    }

    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Terms in lexicographic order.
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.terms.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }
}

/// Stored values of one document, in field insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoredDocument {
    pub(crate) fields: Vec<(String, String)>,
}

impl StoredDocument {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An immutable, fully built view of the index as of one commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub(crate) generation: u64,
    pub(crate) fields: BTreeMap<String, FieldIndex>,
    pub(crate) stored: Vec<StoredDocument>,
}

impl Snapshot {
    pub(crate) fn from_parts(
        generation: u64,
        fields: BTreeMap<String, FieldIndex>,
        stored: Vec<StoredDocument>,
    ) -> Self {
        Self {
            generation,
            fields,
            stored,
        }
    }

    /// A snapshot with no documents. Searching it always returns nothing.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Commit counter; strictly increases with every successful commit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn doc_count(&self) -> usize {
        self.stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldIndex)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Postings for `term` in `field`. `None` for an unknown field or term.
    pub fn postings(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.fields.get(field).and_then(|f| f.postings(term))
    }

    pub fn stored(&self, doc_id: DocId) -> Option<&StoredDocument> {
        self.stored.get(doc_id.as_usize())
    }

    /// Distinct (field, term) pairs.
    pub fn term_count(&self) -> usize {
        self.fields.values().map(FieldIndex::term_count).sum()
    }

    /// Check every structural invariant. See `verify`.
    pub fn validate(&self) -> Result<(), crate::verify::InvariantError> {
        crate::verify::validate_snapshot(self)
    }
}
