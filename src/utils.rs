// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for indexing: strip diacritics and optionally lowercase.
///
/// Folding makes accented and ASCII spellings meet in the same term:
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase (when `lowercase` is set)
///
/// Whitespace is left alone; word segmentation happens afterwards.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str, lowercase: bool, fold_diacritics: bool) -> String {
    let folded: String = if fold_diacritics {
        value.nfd().filter(|c| !is_combining_mark(*c)).collect()
    } else {
        value.to_string()
    };
    if lowercase {
        folded.to_lowercase()
    } else {
        folded
    }
}

/// Lightweight normalization without the unicode-normalization dependency.
/// Only lowercases. Assumes input is ASCII or pre-normalized.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str, lowercase: bool, _fold_diacritics: bool) -> String {
    if lowercase {
        value.to_lowercase()
    } else {
        value.to_string()
    }
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Longest prefix of `text` holding at most `max_chars` Unicode scalar values.
///
/// Counts characters, not bytes, so the cut always lands on a code point
/// boundary. Returns `text` unchanged when it is already short enough.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
