//! Normalization used before keyword extraction.
//!
//! The pipeline is: lowercase, NFD decomposition with combining marks removed,
//! everything outside `[a-z0-9\s]` replaced by a space, whitespace runs collapsed,
//! trimmed. The output is plain ASCII letters, digits and single spaces.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

static COMBINING_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0300}-\u{036F}]+").expect("Combining marks regex pattern is valid and should compile"));
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("Non-alphanumeric regex pattern is valid and should compile"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace run regex pattern is valid and should compile"));
static SENTENCE_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;\n]+").expect("Sentence delimiter regex pattern is valid and should compile"));

/// Decompose to NFD and drop combining diacritical marks (`á` -> `a`, `ñ` -> `n`).
pub fn strip_diacritics(text: &str) -> String {
    let decomposed: String = text.nfd().collect();
    match COMBINING_MARKS.replace_all(&decomposed, "") {
        Cow::Borrowed(_) => decomposed,
        Cow::Owned(stripped) => stripped,
    }
}

/// Normalize text for keyword extraction.
///
/// ```rust
/// use organizatext::text::normalize_text;
///
/// assert_eq!(normalize_text("  Investigación, ¡PROFUNDA!  hoy "), "investigacion profunda hoy");
/// ```
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = strip_diacritics(&lowered);
    let cleaned = NON_ALPHANUMERIC.replace_all(&stripped, " ");
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

/// Split on runs of `. ! ? ;` and newlines, trimming and dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_DELIMITERS
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
