// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot consistency checks.
//!
//! Run after every commit and after decoding a persisted snapshot. A snapshot
//! that fails here is never installed, so readers only ever see one that
//! satisfies all of these:
//!
//! 1. **POSTING_LIST_SORTED**: strictly ascending doc_ids (which also rules
//!    out duplicate postings for one document)
//! 2. **DOC_FREQ_CORRECT**: `doc_freq == postings.len()`
//! 3. **NON_EMPTY**: every term has at least one posting
//! 4. **POSTING_WELLFORMED**: `doc_id < doc_count` (so a stored entry exists)
//!    and `term_freq >= 1`
//! 5. **LENGTHS_ALIGNED**: every field has exactly `doc_count` lengths, each
//!    at least as large as any term frequency recorded for that document

mod types;

pub use types::InvariantError;

use crate::index::Snapshot;

pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), InvariantError> {
    let doc_count = snapshot.doc_count();

    for (field, index) in snapshot.fields() {
        if index.lengths.len() != doc_count {
            return Err(InvariantError::MismatchedLengths {
                field: field.to_string(),
                lengths_len: index.lengths.len(),
                doc_count,
            });
        }

        for (term, list) in index.terms() {
            if list.is_empty() {
                return Err(InvariantError::EmptyPostingList {
                    field: field.to_string(),
                    term: term.to_string(),
                });
            }
            if list.doc_freq != list.len() {
                return Err(InvariantError::IncorrectDocFreq {
                    field: field.to_string(),
                    term: term.to_string(),
                    claimed: list.doc_freq,
                    actual: list.len(),
                });
            }

            for (position, posting) in list.iter().enumerate() {
                if posting.doc_id.as_usize() >= doc_count {
                    return Err(InvariantError::InvalidDocId {
                        field: field.to_string(),
                        term: term.to_string(),
                        doc_id: posting.doc_id.get(),
                        doc_count,
                    });
                }
                if posting.term_freq == 0 {
                    return Err(InvariantError::ZeroTermFrequency {
                        field: field.to_string(),
                        term: term.to_string(),
                        doc_id: posting.doc_id.get(),
                    });
                }
                if position > 0 && list.postings[position - 1].doc_id >= posting.doc_id {
                    return Err(InvariantError::UnsortedPostingList {
                        field: field.to_string(),
                        term: term.to_string(),
                        position,
                    });
                }
                let length = index.field_length(posting.doc_id);
                if length < posting.term_freq {
                    return Err(InvariantError::LengthBelowTermFrequency {
                        field: field.to_string(),
                        doc_id: posting.doc_id.get(),
                        length,
                        term_freq: posting.term_freq,
                    });
                }
            }
        }
    }

    Ok(())
}
