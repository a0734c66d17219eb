//! Configuration for keyword extraction.

use serde::{Deserialize, Serialize};

/// Keyword extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Maximum number of keywords to return (default: 10).
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Replacement stopword list.
    ///
    /// When `None` the process-wide Spanish set from [`crate::stopwords`] is used.
    /// Entries are compared verbatim against normalized tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
}

fn default_max_keywords() -> usize {
    10
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
            stopwords: None,
        }
    }
}

impl KeywordConfig {
    /// Set maximum number of keywords to extract.
    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = max;
        self
    }

    /// Replace the default stopword set for calls using this configuration.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(words.into_iter().map(Into::into).collect());
        self
    }
}
