//! Spanish stopword set used by keyword extraction.
//!
//! Stopwords are common words (el, la, de, para, ...) that never become part of a
//! keyword phrase; they act as phrase delimiters for RAKE.
//!
//! The default list is embedded in the binary at compile time. It can be extended
//! at runtime with [`add_stopwords`]; additions last for the rest of the process.
//!
//! # Usage
//!
//! ```rust
//! use organizatext::stopwords::{add_stopwords, is_stopword};
//!
//! assert!(is_stopword("para"));
//! assert!(!is_stopword("factura"));
//!
//! add_stopwords(["Adjunto"]);
//! assert!(is_stopword("adjunto"));
//! ```
//!
//! Entries are matched verbatim against normalized tokens. Normalization strips
//! diacritics, so accented entries such as `más` only take effect in
//! caller-supplied, non-normalized pipelines.

use ahash::AHashSet;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

const SPANISH_STOPWORDS_JSON: &str = include_str!("../../stopwords/es_stopwords.json");

fn load_embedded() -> AHashSet<String> {
    match serde_json::from_str::<Vec<String>>(SPANISH_STOPWORDS_JSON) {
        Ok(words) => words.into_iter().collect(),
        Err(e) => {
            panic!(
                "Failed to parse embedded Spanish stopwords: {}. \
                This indicates corrupted or malformed JSON in the embedded stopwords data.",
                e
            );
        }
    }
}

/// Process-wide default stopword set.
///
/// Prefer [`with_default_stopwords`], [`is_stopword`] or [`default_stopwords`] over
/// locking this directly.
pub static STOPWORDS: Lazy<RwLock<AHashSet<String>>> = Lazy::new(|| RwLock::new(load_embedded()));

/// Check whether `word` is in the default set.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.read().contains(word)
}

/// Run `f` with a read lock on the default set.
///
/// Used by the keyword extractor to avoid cloning the set for every document.
pub fn with_default_stopwords<R>(f: impl FnOnce(&AHashSet<String>) -> R) -> R {
    let guard = STOPWORDS.read();
    f(&guard)
}

/// Snapshot of the current default set.
pub fn default_stopwords() -> AHashSet<String> {
    STOPWORDS.read().clone()
}

/// Permanently add words to the default set.
///
/// Words are lowercased before insertion.
pub fn add_stopwords<I, S>(words: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = STOPWORDS.write();
    let before = set.len();
    for word in words {
        set.insert(word.as_ref().to_lowercase());
    }
    tracing::debug!(added = set.len() - before, total = set.len(), "Extended default stopword set");
}
