// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where rebuilds get their pages from.
//!
//! A source hands over the complete, ordered set of pages for one rebuild.
//! If it cannot produce anything at all it fails with `SourceUnavailable` and
//! the engine keeps serving its current snapshot. Individual unreadable
//! records are the source's business: it skips them and reports how many.

mod manifest;

use crate::document::WebPage;
use crate::error::Result;

pub use manifest::{Manifest, ManifestSource, MANIFEST_FILE};

/// Pages fetched for one rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBatch {
    /// In the order they should receive docIDs.
    pub pages: Vec<WebPage>,
    /// Records the source could not read and left out.
    pub skipped: usize,
}

impl SourceBatch {
    pub fn new(pages: Vec<WebPage>) -> Self {
        Self { pages, skipped: 0 }
    }
}

/// A provider of pages for a full rebuild.
pub trait DocumentSource: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<SourceBatch>;
}

/// A fixed list of pages held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    pages: Vec<WebPage>,
}

impl MemorySource {
    pub fn new(pages: Vec<WebPage>) -> Self {
        Self { pages }
    }

    pub fn push(&mut self, page: WebPage) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromIterator<WebPage> for MemorySource {
    fn from_iter<I: IntoIterator<Item = WebPage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DocumentSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} pages)", self.pages.len())
    }

    fn fetch(&self) -> Result<SourceBatch> {
        Ok(SourceBatch::new(self.pages.clone()))
    }
}
