// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::ScoredDoc;

/// Bounded top-k selection.
///
/// A min-heap (by rank) of at most `k` entries: each new candidate either
/// displaces the current weakest hit or is dropped. O(n log k), no full sort
/// of the candidates.
#[derive(Debug)]
pub struct TopKCollector {
    k: usize,
    heap: BinaryHeap<Reverse<ScoredDoc>>,
    seen: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            seen: 0,
        }
    }

    pub fn collect(&mut self, hit: ScoredDoc) {
        self.seen += 1;
        if self.k == 0 {
            return;
        }
        if self.heap.len() < self.k {
            self.heap.push(Reverse(hit));
        } else if let Some(mut weakest) = self.heap.peek_mut() {
            if hit > weakest.0 {
                *weakest = Reverse(hit);
            }
        }
    }

    /// Candidates offered so far, kept or not.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Best first: descending score, ties by ascending docID.
    pub fn into_sorted_vec(self) -> Vec<ScoredDoc> {
        // Ascending order of Reverse<_> is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(hit)| hit)
            .collect()
    }
}
