// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A directory of page files listed by a `manifest.json`.
//!
//! ```text
//! crawl/
//! ├── manifest.json   {"version": 1, "documents": ["0.json", "1.json"]}
//! ├── 0.json          {"url": "...", "title": "...", "html": "..."}
//! └── 1.json
//! ```
//!
//! Page files are read in parallel but come back in manifest order. A page
//! file that is missing or not valid JSON is logged and skipped; a missing or
//! invalid manifest makes the whole source unavailable.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DocumentSource, SourceBatch};
use crate::document::WebPage;
use crate::error::{Error, Result};

/// File name of the manifest inside a source directory.
pub const MANIFEST_FILE: &str = "manifest.json";

const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    /// Page files, relative to the manifest's directory.
    pub documents: Vec<String>,
}

/// Loads pages from a manifest directory.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    dir: PathBuf,
    #[cfg(feature = "parallel")]
    progress: Option<ProgressBar>,
}

impl ManifestSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            #[cfg(feature = "parallel")]
            progress: None,
        }
    }

    /// Advance `progress` by one for every page file read.
    #[cfg(feature = "parallel")]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn read_manifest(&self) -> Result<Manifest> {
        let path = self.dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::SourceUnavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        let manifest: Manifest = serde_json::from_str(&content).map_err(|e| {
            Error::SourceUnavailable(format!("invalid manifest {}: {}", path.display(), e))
        })?;
        if manifest.version != SUPPORTED_VERSION {
            return Err(Error::SourceUnavailable(format!(
                "unsupported manifest version {} (expected {})",
                manifest.version, SUPPORTED_VERSION
            )));
        }
        Ok(manifest)
    }

    fn load_page(&self, file: &str) -> std::result::Result<WebPage, String> {
        let path = self.dir.join(file);
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        serde_json::from_str::<WebPage>(&content)
            .map_err(|e| format!("invalid page JSON in {}: {}", path.display(), e))
    }

    #[cfg(feature = "parallel")]
    fn start_progress(&self, len: usize) {
        if let Some(progress) = &self.progress {
            progress.set_length(len as u64);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn start_progress(&self, _len: usize) {}

    #[cfg(feature = "parallel")]
    fn tick(&self) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn tick(&self) {}

    fn load_one(&self, file: &str) -> Option<WebPage> {
        let result = self.load_page(file);
        self.tick();
        result.map_err(|reason| warn!(%reason, "skipping page")).ok()
    }

    #[cfg(feature = "parallel")]
    fn load_all(&self, manifest: &Manifest) -> Vec<Option<WebPage>> {
        manifest
            .documents
            .par_iter()
            .map(|file| self.load_one(file))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn load_all(&self, manifest: &Manifest) -> Vec<Option<WebPage>> {
        manifest
            .documents
            .iter()
            .map(|file| self.load_one(file))
            .collect()
    }
}

impl DocumentSource for ManifestSource {
    fn describe(&self) -> String {
        format!("manifest {}", self.dir.display())
    }

    fn fetch(&self) -> Result<SourceBatch> {
        let manifest = self.read_manifest()?;
        self.start_progress(manifest.documents.len());

        let loaded = self.load_all(&manifest);
        let total = loaded.len();
        let pages: Vec<WebPage> = loaded.into_iter().flatten().collect();
        let skipped = total - pages.len();
        debug!(dir = %self.dir.display(), pages = pages.len(), skipped, "loaded manifest");

        Ok(SourceBatch { pages, skipped })
    }
}
