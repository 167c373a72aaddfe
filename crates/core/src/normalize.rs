//! Tokenization of reference sentences and detected transcriptions.
//!
//! Reference lines arrive as quoc-ngu sentences with publisher punctuation
//! and hyphenated compounds; detected text arrives as an unbroken run of
//! glyphs, occasionally with hyphen artifacts. Both sides normalize here so
//! every alignment call sees the same token conventions.

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;
use unicode_normalization::UnicodeNormalization;

/// Punctuation stripped from sentence and word boundaries.
const EDGE_PUNCT: &[char] = &['.', ',', '?', '!', ':', '(', ')', '[', ']', ';', ' '];

/// Hyphen markers and whitespace both separate words.
static WORD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid split regex"));

/// Splits a reference sentence into normalized words: NFC, boundary
/// punctuation stripped, lowercased, hyphens treated as separators.
pub fn reference_words(line: &str) -> Vec<SmolStr> {
    let composed: String = line.nfc().collect();
    let sentence = composed.trim_matches(EDGE_PUNCT).to_lowercase();
    WORD_SPLIT
        .split(&sentence)
        .map(|word| word.trim_matches(EDGE_PUNCT))
        .filter(|word| !word.is_empty())
        .map(SmolStr::new)
        .collect()
}

/// Word count of a reference sentence after normalization.
pub fn reference_word_count(line: &str) -> usize {
    reference_words(line).len()
}

/// Splits detected text into glyph tokens, dropping hyphen artifacts.
pub fn glyph_tokens(text: &str) -> Vec<char> {
    text.chars().filter(|&c| c != '-').collect()
}
