//! Shared types for keyword extraction.

use serde::{Deserialize, Serialize};

/// Extracted keyword phrase with its RAKE score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The normalized keyword phrase (space-joined tokens).
    #[serde(rename = "keyword")]
    pub text: String,

    /// RAKE score rounded to 3 decimals (higher is better, unbounded).
    pub score: f64,
}

impl Keyword {
    /// Create a new keyword.
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}
