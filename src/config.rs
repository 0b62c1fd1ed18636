// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! The web and console front-ends differ only in their default boolean
//! operator, preview length and hit cap, so those are knobs here rather than
//! hard-coded constants. `EngineConfig::default()` is the
//! web front-end's behavior; `EngineConfig::console()` is the console one.
//!
//! Configs deserialize from camelCase JSON with every key optional:
//!
//! ```json
//! { "defaultOperator": "and", "previewLength": 30, "bm25": { "k1": 1.5 } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Field holding the page URL.
pub const URL_FIELD: &str = "url";
/// Field holding the page title.
pub const TITLE_FIELD: &str = "title";
/// Field holding the raw page HTML.
pub const HTML_FIELD: &str = "html";

/// Standard BM25 term-frequency saturation.
pub const DEFAULT_K1: f64 = 1.2;
/// Standard BM25 length normalization strength.
pub const DEFAULT_B: f64 = 0.75;

/// Hit cap of the web front-end.
pub const DEFAULT_TOP_K: usize = 100;
/// Preview length (in characters) of the web front-end.
pub const DEFAULT_PREVIEW_LENGTH: usize = 250;
/// Hit cap of the console front-end.
pub const CONSOLE_TOP_K: usize = 30;
/// Preview length (in characters) of the console front-end.
pub const CONSOLE_PREVIEW_LENGTH: usize = 30;

/// How bare (unprefixed) query terms combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOperator {
    /// Bare terms are SHOULD clauses: any of them may match.
    #[default]
    Or,
    /// Bare terms are MUST clauses: all of them must match.
    And,
}

/// Stop-word and stemming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    /// No stop words and no stemming.
    None,
}

impl Language {
    /// Key into `data/stop_words.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::None => "none",
        }
    }
}

/// How a field's text is turned into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Full analysis: segmentation, folding, stop words, stemming.
    #[default]
    Text,
    /// The whole trimmed value is one term, case preserved.
    Keyword,
}

/// Text analysis settings shared by every `Text` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    pub language: Language,
    pub lowercase: bool,
    pub fold_diacritics: bool,
    pub stop_words: bool,
    pub stemming: bool,
    /// Tokens shorter than this (in chars) are dropped.
    pub min_token_length: usize,
    /// Tokens longer than this (in chars) are dropped.
    pub max_token_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            lowercase: true,
            fold_diacritics: true,
            stop_words: true,
            stemming: true,
            min_token_length: 1,
            max_token_length: 255,
        }
    }
}

impl AnalyzerConfig {
    /// Lowercasing only: no stop words, no stemming.
    pub fn plain() -> Self {
        Self {
            stop_words: false,
            stemming: false,
            ..Self::default()
        }
    }
}

/// Schema entry for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default = "default_true")]
    pub indexed: bool,
    #[serde(default = "default_true")]
    pub stored: bool,
    /// Multiplies the score of every clause targeting this field.
    #[serde(default = "default_boost")]
    pub boost: f64,
}

fn default_true() -> bool {
    true
}

fn default_boost() -> f64 {
    1.0
}

impl FieldConfig {
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Text,
            indexed: true,
            stored: true,
            boost: 1.0,
        }
    }

    pub fn keyword(name: &str) -> Self {
        Self {
            kind: FieldKind::Keyword,
            ..Self::text(name)
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }
}

/// BM25 constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Field searched by unqualified query terms.
    pub default_field: String,
    pub default_operator: DefaultOperator,
    /// Maximum number of hits returned per query.
    pub top_k: usize,
    /// Maximum preview length, in characters.
    pub preview_length: usize,
    /// Stored field the preview is cut from.
    pub preview_field: String,
    pub bm25: Bm25Params,
    pub analyzer: AnalyzerConfig,
    pub fields: Vec<FieldConfig>,
    /// Where committed snapshots are persisted. `None` keeps the index in memory only.
    pub index_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_field: HTML_FIELD.to_string(),
            default_operator: DefaultOperator::Or,
            top_k: DEFAULT_TOP_K,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            preview_field: HTML_FIELD.to_string(),
            bm25: Bm25Params::default(),
            analyzer: AnalyzerConfig::default(),
            fields: vec![
                FieldConfig::keyword(URL_FIELD),
                FieldConfig::text(TITLE_FIELD),
                FieldConfig::text(HTML_FIELD),
            ],
            index_path: None,
        }
    }
}

impl EngineConfig {
    /// The console front-end: short previews, fewer hits.
    pub fn console() -> Self {
        Self {
            top_k: CONSOLE_TOP_K,
            preview_length: CONSOLE_PREVIEW_LENGTH,
            ..Self::default()
        }
    }

    pub fn with_default_operator(mut self, operator: DefaultOperator) -> Self {
        self.default_operator = operator;
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_preview_length(mut self, chars: usize) -> Self {
        self.preview_length = chars;
        self
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    /// Set the boost of an existing field. Unknown names are ignored.
    pub fn with_field_boost(mut self, name: &str, boost: f64) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.boost = boost;
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Boost for clauses on `name`; 1.0 for fields outside the schema.
    pub fn field_boost(&self, name: &str) -> f64 {
        self.field(name).map_or(1.0, |f| f.boost)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Reject settings that would make scoring or result assembly meaningless.
    pub fn validate(&self) -> Result<()> {
        let Bm25Params { k1, b } = self.bm25;
        if !k1.is_finite() || k1 < 0.0 {
            return Err(Error::Config(format!("bm25.k1 must be finite and >= 0, got {}", k1)));
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(Error::Config(format!("bm25.b must be within [0, 1], got {}", b)));
        }
        if self.preview_length == 0 {
            return Err(Error::Config("previewLength must be at least 1".to_string()));
        }
        if self.analyzer.min_token_length > self.analyzer.max_token_length {
            return Err(Error::Config(format!(
                "analyzer.minTokenLength {} exceeds maxTokenLength {}",
                self.analyzer.min_token_length, self.analyzer.max_token_length
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty()
                || field.name.contains(char::is_whitespace)
                || field.name.contains(':')
            {
                return Err(Error::Config(format!("invalid field name '{}'", field.name)));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::Config(format!("duplicate field '{}'", field.name)));
            }
            if !field.boost.is_finite() || field.boost < 0.0 {
                return Err(Error::Config(format!(
                    "field '{}' has invalid boost {}",
                    field.name, field.boost
                )));
            }
        }

        match self.field(&self.default_field) {
            Some(f) if f.indexed => Ok(()),
            _ => Err(Error::Config(format!(
                "defaultField '{}' is not an indexed field",
                self.default_field
            ))),
        }
    }
}
