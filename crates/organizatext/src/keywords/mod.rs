//! Keyword extraction.
//!
//! Implements RAKE (Rapid Automatic Keyword Extraction) tuned for Spanish text:
//! candidate phrases are delimited by the stopwords in [`crate::stopwords`] and
//! scored by word co-occurrence degree over frequency.
//!
//! # Examples
//!
//! ```rust
//! use organizatext::keywords::{extract_keywords, KeywordConfig};
//!
//! let text = "Informe de investigación profunda sobre gestión documental.";
//! let keywords = extract_keywords(text, &KeywordConfig::default().with_max_keywords(5));
//!
//! for keyword in &keywords {
//!     println!("{}: {:.3}", keyword.text, keyword.score);
//! }
//! assert!(keywords.len() <= 5);
//! ```

pub mod config;
pub mod types;

mod rake;

pub use config::KeywordConfig;
pub use types::Keyword;

/// Extract the top keyword phrases of `text`.
///
/// The result has at most `config.max_keywords` entries, sorted by descending
/// score. Empty input or input made only of stopwords yields an empty list.
pub fn extract_keywords(text: &str, config: &KeywordConfig) -> Vec<Keyword> {
    rake::extract_keywords_rake(text, config)
}

/// Like [`extract_keywords`] but returns only the phrase texts, using the default
/// stopword set.
pub fn extract_keywords_simple(text: &str, top_n: usize) -> Vec<String> {
    let config = KeywordConfig::default().with_max_keywords(top_n);
    extract_keywords(text, &config).into_iter().map(|k| k.text).collect()
}
