// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-language stop word sets loaded from `data/stop_words.json`.
//!
//! The English list is the classic 33-word set most English analyzers ship
//! with. The file is compiled into the binary, so there is no runtime IO.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::config::Language;
use crate::utils::normalize;

static STOP_WORDS: LazyLock<HashMap<String, HashSet<String>>> = LazyLock::new(|| {
    let json_str = include_str!("../../data/stop_words.json");
    parse_stop_words_json(json_str)
});

/// Parse `{ "lang": ["word", ...], ... }` into one set per language.
///
/// Words are inserted both as written and diacritic-folded, so lookups work
/// whether or not the analyzer folds ("más" and "mas").
fn parse_stop_words_json(json_str: &str) -> HashMap<String, HashSet<String>> {
    let raw: HashMap<String, Vec<String>> = serde_json::from_str(json_str).unwrap_or_default();

    raw.into_iter()
        .map(|(lang, words)| {
            let mut set = HashSet::with_capacity(words.len() * 2);
            for word in words {
                let folded = normalize(&word, true, true);
                if !folded.is_empty() {
                    set.insert(folded);
                }
                set.insert(word.to_lowercase());
            }
            (lang, set)
        })
        .collect()
}

/// Stop words for `language`. Empty for `Language::None` or unknown keys.
pub fn stop_words(language: Language) -> HashSet<String> {
    STOP_WORDS
        .get(language.as_str())
        .cloned()
        .unwrap_or_default()
}
