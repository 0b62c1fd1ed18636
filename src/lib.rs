// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory BM25 full-text search over crawled web pages.
//!
//! A rebuild analyzes every page into per-field posting lists, freezes them
//! into an immutable snapshot and swaps that snapshot in atomically. Queries
//! never see a half-built index: each one pins the snapshot that was current
//! when it started.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   source/    │──▶│   writer/    │──▶│    index/    │──▶│   search/    │
//! │ (manifest,   │   │ (session,    │   │ (Snapshot,   │   │ (BM25, top-k │
//! │  memory)     │   │  commit)     │   │  slot)       │   │  collector)  │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                           │                  │                  ▲
//!                           ▼                  ▼                  │
//!                    ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!                    │  analysis/   │   │   binary/    │   │   query/     │
//!                    │ (tokenize,   │   │ (.lexis file │   │ (+a -b f:t)  │
//!                    │  stem, stop) │   │  load/save)  │   │              │
//!                    └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! `SearchEngine` ties these together behind two calls, `rebuild` and `query`.
//!
//! # Usage
//!
//! ```
//! use lexis::{EngineConfig, MemorySource, SearchEngine, WebPage};
//!
//! let engine = SearchEngine::new(EngineConfig::default())?;
//! engine.rebuild(&MemorySource::new(vec![
//!     WebPage::new("a.com/1", "Doc 1", "the cat sat"),
//!     WebPage::new("a.com/2", "Doc 2", "the cat cat cat"),
//! ]))?;
//!
//! let response = engine.query("html:cat")?;
//! assert_eq!(response.urls().collect::<Vec<_>>(), vec!["a.com/2", "a.com/1"]);
//! # Ok::<(), lexis::Error>(())
//! ```

pub mod analysis;
pub mod binary;
pub mod config;
pub mod document;
mod engine;
mod error;
pub mod index;
pub mod query;
mod results;
pub mod search;
pub mod source;
mod types;
mod utils;
pub mod verify;
pub mod writer;

#[doc(hidden)]
pub mod testing;

pub use analysis::{Analyzer, AnalyzerRegistry, KeywordAnalyzer, StandardAnalyzer};
pub use binary::SnapshotStore;
pub use config::{
    AnalyzerConfig, Bm25Params, DefaultOperator, EngineConfig, FieldConfig, FieldKind, Language,
};
pub use document::{Document, Field, WebPage};
pub use engine::{RebuildReport, SearchEngine};
pub use error::{Error, Result};
pub use index::{FieldIndex, IndexReader, Snapshot, SnapshotSlot, StoredDocument};
pub use query::{BooleanQuery, Clause, Occur, QueryParser};
pub use results::{assemble, Hit, QueryResponse};
pub use search::Searcher;
pub use source::{DocumentSource, ManifestSource, MemorySource, SourceBatch, MANIFEST_FILE};
pub use types::{DocId, Posting, PostingList, ScoredDoc, TopDocs};
pub use utils::{normalize, truncate_chars};
pub use verify::{validate_snapshot, InvariantError};
pub use writer::{CommitReport, DocumentFailure, IndexWriter, WriteSession};
