//! Text normalization and counting helpers shared by the analysers.

pub mod normalize;

pub use normalize::{char_count, normalize_text, split_sentences, strip_diacritics, word_count};
