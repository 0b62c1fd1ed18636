// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The two verbs a boundary needs: rebuild the index, run a query.
//!
//! `SearchEngine` owns one writer and one reader over a shared snapshot slot.
//! It is `Send + Sync`; wrap it in an `Arc` and call `query` from as many
//! threads as you like while another thread runs `rebuild`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::analysis::AnalyzerRegistry;
use crate::binary::SnapshotStore;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::index::{IndexReader, Snapshot, SnapshotSlot};
use crate::query::QueryParser;
use crate::results::{assemble, QueryResponse};
use crate::source::DocumentSource;
use crate::writer::{DocumentFailure, IndexWriter};

/// Outcome of `SearchEngine::rebuild`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildReport {
    /// Generation of the snapshot now being served.
    pub generation: u64,
    /// Pages that made it into the index.
    pub indexed: usize,
    /// Pages the writer rejected (nothing to index).
    pub skipped: usize,
    /// Records the source itself could not read.
    pub source_skipped: usize,
    pub failures: Vec<DocumentFailure>,
}

/// A configured engine: constructor, `rebuild`, `query`.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    writer: IndexWriter,
    reader: IndexReader,
    parser: QueryParser,
}

impl SearchEngine {
    /// Validate `config` and, if it names an index file that exists, start
    /// out serving the snapshot stored there.
    ///
    /// A file that cannot be decoded is logged and ignored: the engine starts
    /// not ready, and the next rebuild replaces the file.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let analyzers = Arc::new(AnalyzerRegistry::from_config(&config));
        let store = config.index_path.clone().map(SnapshotStore::new);

        let slot = match store.as_ref().map(load_existing).transpose()?.flatten() {
            Some(snapshot) => SnapshotSlot::with_snapshot(snapshot),
            None => SnapshotSlot::new(),
        };

        let mut writer = IndexWriter::new(Arc::clone(&analyzers), slot.clone());
        if let Some(store) = store {
            writer = writer.with_store(store);
        }
        let reader = IndexReader::new(slot, config.bm25);
        let parser = QueryParser::new(&config, analyzers);

        Ok(Self {
            config,
            writer,
            reader,
            parser,
        })
    }

    /// Replace the whole index with what `source` provides.
    ///
    /// Fails with `BuildInProgress` if another rebuild is running and with
    /// `SourceUnavailable` if the source could not be read at all. Either way,
    /// and on any other error, the current snapshot keeps serving. A source
    /// that yields zero pages commits an empty snapshot.
    pub fn rebuild(&self, source: &dyn DocumentSource) -> Result<RebuildReport> {
        let span = info_span!("rebuild", source = %source.describe());
        let _guard = span.enter();

        let mut session = self.writer.begin_build()?;
        let batch = source.fetch()?;

        let documents = batch.pages.iter().map(|page| page.to_document(&self.config));
        session.add_documents(documents);
        let commit = self.writer.commit(session)?;

        let report = RebuildReport {
            generation: commit.generation,
            indexed: commit.doc_count,
            skipped: commit.skipped,
            source_skipped: batch.skipped,
            failures: commit.failures,
        };
        info!(
            generation = report.generation,
            indexed = report.indexed,
            skipped = report.skipped,
            source_skipped = report.source_skipped,
            "rebuild complete"
        );
        Ok(report)
    }

    /// Run `query` against the current snapshot.
    ///
    /// The query is parsed first, so a malformed query is a `QuerySyntax`
    /// error even before anything has been committed.
    pub fn query(&self, query: &str) -> Result<QueryResponse> {
        let span = info_span!("query");
        let _guard = span.enter();

        let parsed = self.parser.parse(query)?;
        let searcher = self.reader.searcher()?;
        let top_docs = searcher.top_docs(&parsed, self.config.top_k);
        debug!(
            query = %parsed,
            total_hits = top_docs.total_hits,
            generation = searcher.snapshot().generation(),
            "query answered"
        );
        Ok(assemble(searcher.snapshot(), top_docs, &self.config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parser(&self) -> &QueryParser {
        &self.parser
    }

    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    pub fn writer(&self) -> &IndexWriter {
        &self.writer
    }

    /// The snapshot being served, if any.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.reader.snapshot().ok()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }
}

fn load_existing(store: &SnapshotStore) -> Result<Option<Snapshot>> {
    match store.load() {
        Err(err @ (Error::Format(_) | Error::Corrupt(_))) => {
            warn!(
                path = %store.path().display(),
                error = %err,
                "ignoring unreadable index file"
            );
            Ok(None)
        }
        other => other,
    }
}
