// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::Analyzer;

/// Indexes the whole value as a single term.
///
/// Used for identifiers such as URLs, where `url:a.com/1` must match exactly
/// that value and nothing that merely shares a word with it. Surrounding
/// whitespace is trimmed; case is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl Analyzer for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn analyze<'a>(&'a self, text: &str) -> Box<dyn Iterator<Item = String> + 'a> {
        let value = text.trim();
        if value.is_empty() {
            Box::new(std::iter::empty())
        } else {
            Box::new(std::iter::once(value.to_string()))
        }
    }
}
