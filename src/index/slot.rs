// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use parking_lot::RwLock;

use super::Snapshot;
use crate::config::Bm25Params;
use crate::error::{Error, Result};
use crate::search::Searcher;

/// The single "current snapshot" reference shared by the writer and readers.
///
/// The write lock is held only for the pointer swap itself, never while a
/// snapshot is being built or searched.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSlot {
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that already serves `snapshot` (e.g. one loaded from disk).
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let slot = Self::new();
        slot.install(Arc::new(snapshot));
        slot
    }

    /// The snapshot being served right now, if any commit has happened.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    /// Replace the served snapshot. Returns the one it superseded.
    pub fn install(&self, snapshot: Arc<Snapshot>) -> Option<Arc<Snapshot>> {
        self.current.write().replace(snapshot)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }
}

/// Read side of the index: hands out searchers pinned to the current snapshot.
#[derive(Debug, Clone)]
pub struct IndexReader {
    slot: SnapshotSlot,
    bm25: Bm25Params,
}

impl IndexReader {
    pub fn new(slot: SnapshotSlot, bm25: Bm25Params) -> Self {
        Self { slot, bm25 }
    }

    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.slot.current().ok_or(Error::IndexNotReady)
    }

    /// A searcher over whatever is committed at this instant. It keeps using
    /// that snapshot even if a newer one is installed meanwhile.
    pub fn searcher(&self) -> Result<Searcher> {
        Ok(Searcher::with_params(self.snapshot()?, self.bm25))
    }
}
