// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning ranked docIDs into what a caller displays.

use serde::Serialize;

use crate::config::{EngineConfig, TITLE_FIELD, URL_FIELD};
use crate::index::Snapshot;
use crate::types::{DocId, TopDocs};
use crate::utils::truncate_chars;

/// One displayed search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub doc_id: DocId,
    pub score: f64,
    pub url: String,
    pub title: String,
    /// The preview field cut to at most `previewLength` characters.
    pub preview: String,
}

/// Ranked hits for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Every matching document, not just the returned ones.
    pub total_hits: usize,
    /// Generation of the snapshot that answered.
    pub generation: u64,
    pub hits: Vec<Hit>,
}

impl QueryResponse {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|h| h.url.as_str())
    }
}

/// Look up stored fields for every ranked document. Missing stored values
/// come back as empty strings.
pub fn assemble(snapshot: &Snapshot, top_docs: TopDocs, config: &EngineConfig) -> QueryResponse {
    let hits = top_docs
        .hits
        .into_iter()
        .filter_map(|scored| {
            let stored = snapshot.stored(scored.doc_id)?;
            let field = |name: &str| stored.get(name).unwrap_or_default().to_string();
            Some(Hit {
                doc_id: scored.doc_id,
                score: scored.score,
                url: field(URL_FIELD),
                title: field(TITLE_FIELD),
                preview: truncate_chars(
                    stored.get(&config.preview_field).unwrap_or_default(),
                    config.preview_length,
                )
                .to_string(),
            })
        })
        .collect();

    QueryResponse {
        total_hits: top_docs.total_hits,
        generation: snapshot.generation(),
        hits,
    }
}
