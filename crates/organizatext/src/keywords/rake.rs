//! RAKE (Rapid Automatic Keyword Extraction) scorer.
//!
//! Candidate phrases are maximal runs of non-stopword tokens within a sentence.
//! Every token gets `degree / frequency`, where for each candidate occurrence the
//! token's frequency grows by one and its degree grows by the candidate's length.
//! A token repeated inside one phrase is counted once per repetition. Phrase score
//! is the sum of its token scores, multiplied by 1.5 for multi-token phrases.

use super::config::KeywordConfig;
use super::types::Keyword;
use crate::stopwords;
use crate::text::{normalize_text, split_sentences};
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

/// Tokens shorter than this are skipped entirely (they neither join nor split a phrase).
const MIN_TOKEN_LENGTH: usize = 2;

/// Score multiplier for phrases with more than one token.
const MULTI_WORD_BONUS: f64 = 1.5;

#[derive(Debug, Default, Clone, Copy)]
struct WordStats {
    frequency: u32,
    degree: u32,
}

/// Extract keywords using RAKE.
///
/// Returns at most `config.max_keywords` entries sorted by descending score. Ties
/// keep the order in which phrases first appeared in the document.
pub fn extract_keywords_rake(text: &str, config: &KeywordConfig) -> Vec<Keyword> {
    if text.trim().is_empty() || config.max_keywords == 0 {
        return Vec::new();
    }

    let normalized = normalize_text(text);

    let candidates = match &config.stopwords {
        Some(words) => {
            let custom: AHashSet<&str> = words.iter().map(String::as_str).collect();
            collect_candidates(&normalized, |word| custom.contains(word))
        }
        None => stopwords::with_default_stopwords(|set| collect_candidates(&normalized, |word| set.contains(word))),
    };

    if candidates.is_empty() {
        return Vec::new();
    }

    let word_scores = score_words(&candidates);
    let phrase_scores = score_phrases(&candidates, &word_scores);

    let mut ranked: Vec<(String, f64)> = phrase_scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.max_keywords);

    ranked
        .into_iter()
        .map(|(phrase, score)| Keyword::new(phrase, round_score(score)))
        .collect()
}

fn collect_candidates<'a>(normalized: &'a str, is_stopword: impl Fn(&str) -> bool) -> Vec<Vec<&'a str>> {
    let mut candidates = Vec::new();

    for sentence in split_sentences(normalized) {
        let mut current: Vec<&str> = Vec::new();

        for word in sentence.split_whitespace() {
            if word.chars().count() < MIN_TOKEN_LENGTH {
                continue;
            }

            if is_stopword(word) {
                if !current.is_empty() {
                    candidates.push(std::mem::take(&mut current));
                }
            } else {
                current.push(word);
            }
        }

        if !current.is_empty() {
            candidates.push(current);
        }
    }

    candidates
}

fn score_words<'a>(candidates: &[Vec<&'a str>]) -> AHashMap<&'a str, f64> {
    let mut stats: AHashMap<&str, WordStats> = AHashMap::new();

    for phrase in candidates {
        let length = phrase.len() as u32;
        for word in phrase {
            let entry = stats.entry(*word).or_default();
            entry.frequency += 1;
            entry.degree += length;
        }
    }

    stats
        .into_iter()
        .map(|(word, s)| (word, f64::from(s.degree) / f64::from(s.frequency)))
        .collect()
}

fn score_phrases(candidates: &[Vec<&str>], word_scores: &AHashMap<&str, f64>) -> IndexMap<String, f64> {
    let mut scores = IndexMap::with_capacity(candidates.len());

    for phrase in candidates {
        let sum: f64 = phrase
            .iter()
            .map(|word| word_scores.get(word).copied().unwrap_or(0.0))
            .sum();
        let bonus = if phrase.len() > 1 { MULTI_WORD_BONUS } else { 1.0 };
        scores.insert(phrase.join(" "), sum * bonus);
    }

    scores
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
