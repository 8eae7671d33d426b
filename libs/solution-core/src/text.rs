//! String helpers shared by the builder, matcher and diff.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{M}\p{N}]+").expect("valid word regex"));

static WORD_OR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+|[^\p{L}\p{M}\p{N}]+").expect("valid token regex")
});

static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s+\S").expect("valid broken word regex"));

/// Unicode NFC.
pub fn nfc(value: &str) -> String {
    value.nfc().collect()
}

/// Unicode NFC, trimmed.
pub fn normalize(value: &str) -> String {
    nfc(value).trim().to_string()
}

/// Maximal runs of letters and digits.
pub fn words(value: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(value).map(|m| m.as_str())
}

/// Split into alternating runs of word and non-word characters.
pub fn split_words_and_separators(value: &str) -> Vec<&str> {
    WORD_OR_SEPARATOR
        .find_iter(value)
        .map(|m| m.as_str())
        .collect()
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether a value holds non-space characters on both sides of whitespace.
pub fn has_inner_whitespace(value: &str) -> bool {
    BROKEN_WORD.is_match(value)
}
