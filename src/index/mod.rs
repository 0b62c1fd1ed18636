// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The committed index: immutable snapshots and the slot that serves them.
//!
//! A `Snapshot` never changes after commit. Rebuilding produces a whole new
//! one, and `SnapshotSlot::install` swaps the shared `Arc` in one step.
//! Searchers clone the `Arc` when they start, so an in-flight search keeps
//! reading the snapshot it began with while newer searches see the new one.

mod slot;
mod snapshot;

pub use slot::{IndexReader, SnapshotSlot};
pub use snapshot::{FieldIndex, Snapshot, StoredDocument};
