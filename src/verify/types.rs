// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A posting refers to a document the snapshot does not contain.
    InvalidDocId {
        field: String,
        term: String,
        doc_id: u32,
        doc_count: usize,
    },
    /// Posting list is not strictly ascending by doc_id.
    UnsortedPostingList {
        field: String,
        term: String,
        position: usize,
    },
    /// Document frequency doesn't match the number of postings.
    IncorrectDocFreq {
        field: String,
        term: String,
        claimed: usize,
        actual: usize,
    },
    /// Every term must have at least one posting.
    EmptyPostingList { field: String, term: String },
    /// A posting with a zero term frequency.
    ZeroTermFrequency {
        field: String,
        term: String,
        doc_id: u32,
    },
    /// Field length table and document count disagree.
    MismatchedLengths {
        field: String,
        lengths_len: usize,
        doc_count: usize,
    },
    /// A document's field length is smaller than the tf of a term it contains.
    LengthBelowTermFrequency {
        field: String,
        doc_id: u32,
        length: u32,
        term_freq: u32,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::InvalidDocId {
                field,
                term,
                doc_id,
                doc_count,
            } => {
                write!(
                    f,
                    "posting for '{}:{}' has doc_id {} >= doc_count {}",
                    field, term, doc_id, doc_count
                )
            }
            InvariantError::UnsortedPostingList {
                field,
                term,
                position,
            } => {
                write!(
                    f,
                    "posting list for '{}:{}' not sorted at position {}",
                    field, term, position
                )
            }
            InvariantError::IncorrectDocFreq {
                field,
                term,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "posting list for '{}:{}' has doc_freq {} but {} postings",
                    field, term, claimed, actual
                )
            }
            InvariantError::EmptyPostingList { field, term } => {
                write!(f, "posting list for '{}:{}' is empty", field, term)
            }
            InvariantError::ZeroTermFrequency { field, term, doc_id } => {
                write!(
                    f,
                    "posting for '{}:{}' in doc {} has term_freq 0",
                    field, term, doc_id
                )
            }
            InvariantError::MismatchedLengths {
                field,
                lengths_len,
                doc_count,
            } => {
                write!(
                    f,
                    "field '{}' has {} lengths for {} documents",
                    field, lengths_len, doc_count
                )
            }
            InvariantError::LengthBelowTermFrequency {
                field,
                doc_id,
                length,
                term_freq,
            } => {
                write!(
                    f,
                    "field '{}' of doc {} has length {} below term_freq {}",
                    field, doc_id, length, term_freq
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}
