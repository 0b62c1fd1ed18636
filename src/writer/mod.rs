// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building and committing snapshots.
//!
//! ```text
//! begin_build()            add_document() ...           commit(session)
//!      │                         │                            │
//!      ▼                         ▼                            ▼
//! ┌──────────┐  analyze   ┌──────────────┐  finish   ┌──────────────────┐
//! │  permit  │──────────▶│ WriteSession │─────────▶│ Snapshot (gen+1) │
//! └──────────┘            │ postings,    │           │ validate         │
//!                         │ lengths,     │           │ persist (opt.)   │
//!                         │ stored       │           │ install ─▶ slot  │
//!                         └──────────────┘           └──────────────────┘
//! ```
//!
//! Only one session exists at a time: a second `begin_build` fails with
//! `BuildInProgress` until the first session is committed or dropped. The
//! served snapshot is touched exactly once, by the final `install`, so a
//! commit that fails at any earlier step leaves it as it was.

mod parallel;
mod session;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::AnalyzerRegistry;
use crate::binary::SnapshotStore;
use crate::error::Result;
use crate::index::{Snapshot, SnapshotSlot};

pub use session::{DocumentFailure, WriteSession};

/// Outcome of a successful commit.
#[derive(Debug, Clone)]
pub struct CommitReport {
    /// The snapshot that is now being served.
    pub snapshot: Arc<Snapshot>,
    pub generation: u64,
    pub doc_count: usize,
    /// Documents rejected during the build.
    pub skipped: usize,
    pub failures: Vec<DocumentFailure>,
    pub term_count: usize,
}

/// The single writer of a `SnapshotSlot`.
#[derive(Debug, Clone)]
pub struct IndexWriter {
    analyzers: Arc<AnalyzerRegistry>,
    slot: SnapshotSlot,
    building: Arc<AtomicBool>,
    store: Option<SnapshotStore>,
}

impl IndexWriter {
    pub fn new(analyzers: Arc<AnalyzerRegistry>, slot: SnapshotSlot) -> Self {
        Self {
            analyzers,
            slot,
            building: Arc::new(AtomicBool::new(false)),
            store: None,
        }
    }

    /// Persist every committed snapshot to `store` before it is installed.
    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Start a fresh build. Has no effect on the snapshot being served.
    pub fn begin_build(&self) -> Result<WriteSession> {
        let permit = session::BuildPermit::acquire(&self.building)?;
        debug!("build session started");
        Ok(WriteSession::new(permit, Arc::clone(&self.analyzers)))
    }

    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::Acquire)
    }

    /// Finalize `session` into a snapshot and make it the current one.
    ///
    /// The session is consumed either way. On error the previously committed
    /// snapshot (and the persisted file, if any) is unchanged.
    pub fn commit(&self, session: WriteSession) -> Result<CommitReport> {
        let (output, _permit) = session.finish();

        let generation = self.slot.current().map_or(1, |s| s.generation() + 1);
        let skipped = output.failures.len();
        let snapshot = Snapshot::from_parts(generation, output.fields, output.stored);
        snapshot.validate()?;

        if let Some(store) = &self.store {
            store.save(&snapshot)?;
        }

        let snapshot = Arc::new(snapshot);
        self.slot.install(Arc::clone(&snapshot));

        let report = CommitReport {
            generation,
            doc_count: snapshot.doc_count(),
            skipped,
            failures: output.failures,
            term_count: snapshot.term_count(),
            snapshot,
        };
        info!(
            generation,
            docs = report.doc_count,
            skipped,
            terms = report.term_count,
            "committed snapshot"
        );
        Ok(report)
    }
}
