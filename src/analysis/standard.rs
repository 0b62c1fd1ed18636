// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full text pipeline: fold → segment → length filter → stop words → stem.
//!
//! Segmentation follows UAX #29 word boundaries, so "a.com/1" yields "a.com"
//! and "1", and punctuation never becomes a term. Stop words are checked
//! before stemming, against the folded token.

use std::collections::HashSet;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use super::stop_words::stop_words;
use super::Analyzer;
use crate::config::{AnalyzerConfig, Language};
use crate::utils::normalize;

/// Configurable analyzer for natural-language fields.
pub struct StandardAnalyzer {
    config: AnalyzerConfig,
    stop_words: HashSet<String>,
    stemmer: Option<Stemmer>,
}

impl StandardAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let stop_words = if config.stop_words {
            stop_words(config.language)
        } else {
            HashSet::new()
        };
        let stemmer = if config.stemming {
            stemmer_for(config.language).map(Stemmer::create)
        } else {
            None
        };

        Self {
            config,
            stop_words,
            stemmer,
        }
    }

    /// English analysis: stop words and stemming on.
    pub fn english() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Everything after segmentation, for one word. `None` drops the token.
    fn filter_token(&self, word: &str) -> Option<String> {
        let len = word.chars().count();
        if len < self.config.min_token_length || len > self.config.max_token_length {
            return None;
        }

        if !self.stop_words.is_empty() {
            let is_stop = if self.config.lowercase {
                self.stop_words.contains(word)
            } else {
                self.stop_words.contains(&word.to_lowercase())
            };
            if is_stop {
                return None;
            }
        }

        match &self.stemmer {
            Some(stemmer) => Some(stemmer.stem(word).into_owned()),
            None => Some(word.to_string()),
        }
    }
}

fn stemmer_for(language: Language) -> Option<Algorithm> {
    match language {
        Language::English => Some(Algorithm::English),
        Language::Spanish => Some(Algorithm::Spanish),
        Language::French => Some(Algorithm::French),
        Language::German => Some(Algorithm::German),
        Language::None => None,
    }
}

impl Analyzer for StandardAnalyzer {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn analyze<'a>(&'a self, text: &str) -> Box<dyn Iterator<Item = String> + 'a> {
        let buffer = normalize(text, self.config.lowercase, self.config.fold_diacritics);
        let spans: Vec<(usize, usize)> = buffer
            .unicode_word_indices()
            .map(|(start, word)| (start, start + word.len()))
            .collect();

        Box::new(
            spans
                .into_iter()
                .filter_map(move |(start, end)| self.filter_token(&buffer[start..end])),
        )
    }
}

impl fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("config", &self.config)
            .field("stop_words", &self.stop_words.len())
            .field("stemming", &self.stemmer.is_some())
            .finish()
    }
}
