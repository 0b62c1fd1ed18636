// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batch analysis.
//!
//! Analysis is the expensive part of a build and every document is
//! independent, so with rayon it is a plain `par_iter()`. Results come back in
//! input order, which keeps docID assignment deterministic.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::session::{analyze_document, AnalyzedDocument};
use crate::analysis::AnalyzerRegistry;
use crate::document::Document;
use crate::error::Result;

#[cfg(feature = "parallel")]
pub(crate) fn analyze_batch(
    analyzers: &AnalyzerRegistry,
    documents: &[Document],
) -> Vec<Result<AnalyzedDocument>> {
    documents
        .par_iter()
        .map(|doc| analyze_document(analyzers, doc))
        .collect()
}

/// Sequential fallback.
#[cfg(not(feature = "parallel"))]
pub(crate) fn analyze_batch(
    analyzers: &AnalyzerRegistry,
    documents: &[Document],
) -> Vec<Result<AnalyzedDocument>> {
    documents
        .iter()
        .map(|doc| analyze_document(analyzers, doc))
        .collect()
}
