// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: turning field text into the terms that get indexed.
//!
//! The one rule that matters: a field must be analyzed the same way at index
//! time and at query time. Getting it wrong is not an error, results just
//! quietly stop matching. `AnalyzerRegistry` is the single place both the
//! writer and the query parser look analyzers up, so they cannot drift apart.

mod keyword;
mod standard;
mod stop_words;

use std::collections::HashMap;
use std::sync::Arc;

pub use keyword::KeywordAnalyzer;
pub use standard::StandardAnalyzer;
pub use stop_words::stop_words;

use crate::config::{EngineConfig, FieldKind};

/// Pluggable text → terms conversion.
///
/// `analyze` is lazy and restartable: each call starts a fresh, finite
/// sequence and has no side effects.
pub trait Analyzer: Send + Sync {
    /// Short identifier, used in logs and `inspect` output.
    fn name(&self) -> &'static str;

    fn analyze<'a>(&'a self, text: &str) -> Box<dyn Iterator<Item = String> + 'a>;

    /// Collect every term of `text`.
    fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).collect()
    }
}

/// Field name → analyzer, with a fallback for fields outside the schema.
#[derive(Clone)]
pub struct AnalyzerRegistry {
    fallback: Arc<dyn Analyzer>,
    per_field: HashMap<String, Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Every field gets `analyzer`.
    pub fn uniform(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            fallback: analyzer,
            per_field: HashMap::new(),
        }
    }

    /// Text fields share one `StandardAnalyzer`; keyword fields get a
    /// `KeywordAnalyzer`. Unknown fields fall back to the standard one.
    pub fn from_config(config: &EngineConfig) -> Self {
        let standard: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new(config.analyzer.clone()));
        let keyword: Arc<dyn Analyzer> = Arc::new(KeywordAnalyzer);

        let per_field = config
            .fields
            .iter()
            .map(|field| {
                let analyzer = match field.kind {
                    FieldKind::Text => Arc::clone(&standard),
                    FieldKind::Keyword => Arc::clone(&keyword),
                };
                (field.name.clone(), analyzer)
            })
            .collect();

        Self {
            fallback: standard,
            per_field,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, analyzer: Arc<dyn Analyzer>) -> Self {
        self.per_field.insert(field.into(), analyzer);
        self
    }

    pub fn for_field(&self, field: &str) -> &dyn Analyzer {
        self.per_field
            .get(field)
            .map_or(self.fallback.as_ref(), |a| a.as_ref())
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl std::fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<(&str, &str)> = self
            .per_field
            .iter()
            .map(|(name, a)| (name.as_str(), a.name()))
            .collect();
        fields.sort_unstable();
        f.debug_struct("AnalyzerRegistry")
            .field("fallback", &self.fallback.name())
            .field("fields", &fields)
            .finish()
    }
}
