// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::analysis::AnalyzerRegistry;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::index::{FieldIndex, StoredDocument};
use crate::types::{DocId, Posting, PostingList};

/// Exclusive right to run a build. Released when dropped, whether the session
/// was committed or abandoned.
#[derive(Debug)]
pub(crate) struct BuildPermit {
    flag: Arc<AtomicBool>,
}

impl BuildPermit {
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::BuildInProgress)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BuildPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A document that was rejected during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    /// Zero-based position among all documents offered to the session.
    pub position: usize,
    pub reason: String,
}

/// Term statistics of one field of one document.
#[derive(Debug, Default)]
pub(crate) struct FieldTerms {
    length: u32,
    freqs: HashMap<String, u32>,
}

/// A document after analysis, before it has a docID.
///
/// Analysis only reads the registry, so many documents can be analyzed at
/// once. Assigning docIDs and merging into the session stays sequential.
#[derive(Debug)]
pub(crate) struct AnalyzedDocument {
    fields: BTreeMap<String, FieldTerms>,
    stored: StoredDocument,
}

pub(crate) fn analyze_document(
    analyzers: &AnalyzerRegistry,
    document: &Document,
) -> Result<AnalyzedDocument> {
    if !document.has_indexed_fields() {
        return Err(Error::invalid_document("document has no indexed fields"));
    }
    if document.indexed_fields().all(|f| f.text.trim().is_empty()) {
        return Err(Error::invalid_document("indexed fields are blank"));
    }

    let mut fields: BTreeMap<String, FieldTerms> = BTreeMap::new();
    for field in document.indexed_fields() {
        let analyzer = analyzers.for_field(&field.name);
        let entry = fields.entry(field.name.clone()).or_default();
        for term in analyzer.analyze(&field.text) {
            entry.length = entry.length.saturating_add(1);
            *entry.freqs.entry(term).or_insert(0) += 1;
        }
    }

    // Text that analyzed to nothing (only stop words, say) still makes a
    // document; its length in that field is zero, same as an absent field.
    fields.retain(|_, terms| terms.length > 0);

    let stored = StoredDocument::new(
        document
            .stored_fields()
            .map(|f| (f.name.clone(), f.text.clone()))
            .collect(),
    );

    Ok(AnalyzedDocument { fields, stored })
}

#[derive(Debug, Default)]
struct FieldAccumulator {
    postings: HashMap<String, Vec<Posting>>,
    /// Sparse until `finish`: only as long as the last docID with this field.
    lengths: Vec<u32>,
}

impl FieldAccumulator {
    fn finish(mut self, doc_count: usize) -> FieldIndex {
        self.lengths.resize(doc_count, 0);
        let terms = self
            .postings
            .into_iter()
            .map(|(term, postings)| (term, PostingList::from_unsorted(postings)))
            .collect();
        FieldIndex::new(terms, self.lengths)
    }
}

/// Everything a session accumulated, ready to become a snapshot.
#[derive(Debug)]
pub(crate) struct SessionOutput {
    pub fields: BTreeMap<String, FieldIndex>,
    pub stored: Vec<StoredDocument>,
    pub failures: Vec<DocumentFailure>,
}

/// An isolated, in-progress build.
///
/// Nothing here is visible to searchers until `IndexWriter::commit`.
/// Dropping a session without committing discards it and frees the writer
/// for the next build.
#[derive(Debug)]
pub struct WriteSession {
    permit: BuildPermit,
    analyzers: Arc<AnalyzerRegistry>,
    fields: HashMap<String, FieldAccumulator>,
    stored: Vec<StoredDocument>,
    failures: Vec<DocumentFailure>,
    offered: usize,
}

impl WriteSession {
    pub(crate) fn new(permit: BuildPermit, analyzers: Arc<AnalyzerRegistry>) -> Self {
        Self {
            permit,
            analyzers,
            fields: HashMap::new(),
            stored: Vec::new(),
            failures: Vec::new(),
            offered: 0,
        }
    }

    /// Analyze `document` and give it the next docID.
    ///
    /// A rejected document is recorded as a failure and skipped; it does not
    /// consume a docID and the session stays usable.
    pub fn add_document(&mut self, document: Document) -> Result<DocId> {
        let analyzed = analyze_document(&self.analyzers, &document);
        self.accept(analyzed)
    }

    /// Add many documents, analyzing them in parallel when the `parallel`
    /// feature is on. DocIDs follow iteration order either way.
    ///
    /// Returns how many were added; rejects are in `failures()`.
    pub fn add_documents<I>(&mut self, documents: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let documents: Vec<Document> = documents.into_iter().collect();
        let analyzed = super::parallel::analyze_batch(&self.analyzers, &documents);
        analyzed
            .into_iter()
            .filter_map(|result| self.accept(result).ok())
            .count()
    }

    fn accept(&mut self, analyzed: Result<AnalyzedDocument>) -> Result<DocId> {
        let position = self.offered;
        self.offered += 1;

        match analyzed.and_then(|doc| self.push(doc)) {
            Ok(doc_id) => Ok(doc_id),
            Err(err) => {
                warn!(position, error = %err, "skipping document");
                self.failures.push(DocumentFailure {
                    position,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn push(&mut self, document: AnalyzedDocument) -> Result<DocId> {
        let raw = u32::try_from(self.stored.len())
            .map_err(|_| Error::invalid_document("document limit reached"))?;
        let doc_id = DocId(raw);

        for (name, terms) in document.fields {
            let acc = self.fields.entry(name).or_default();
            if acc.lengths.len() <= doc_id.as_usize() {
                acc.lengths.resize(doc_id.as_usize() + 1, 0);
            }
            acc.lengths[doc_id.as_usize()] = terms.length;
            for (term, term_freq) in terms.freqs {
                acc.postings
                    .entry(term)
                    .or_default()
                    .push(Posting { doc_id, term_freq });
            }
        }
        self.stored.push(document.stored);

        Ok(doc_id)
    }

    /// Documents accepted so far.
    pub fn doc_count(&self) -> usize {
        self.stored.len()
    }

    pub fn failures(&self) -> &[DocumentFailure] {
        &self.failures
    }

    pub(crate) fn finish(self) -> (SessionOutput, BuildPermit) {
        let doc_count = self.stored.len();
        let fields = self
            .fields
            .into_iter()
            .map(|(name, acc)| (name, acc.finish(doc_count)))
            .collect();
        let output = SessionOutput {
            fields,
            stored: self.stored,
            failures: self.failures,
        };
        (output, self.permit)
    }
}
