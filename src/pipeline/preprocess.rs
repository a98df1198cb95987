//! Preprocessing: raw page text → one normalized, length-capped text blob.
//!
//! ```text
//! raw ──▶ noise ──▶ rank(top_n) ──▶ stopwords ──▶ cap(max_chars)
//! ```
//!
//! The cap is a hard bound applied to whatever ranking produced; it counts
//! characters and may end mid-sentence.

use crate::config::McqConfig;
use crate::pipeline::noise::NoiseFilter;
use crate::pipeline::rank::SentenceRanker;
use crate::pipeline::stopwords::trim_stopwords;
use tracing::debug;

/// Runs the text-normalization stages in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessor {
    pub noise: NoiseFilter,
    pub ranker: SentenceRanker,
    pub max_chars: usize,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            noise: NoiseFilter::default(),
            ranker: SentenceRanker::new(20),
            max_chars: 1500,
        }
    }
}

impl Preprocessor {
    pub fn from_config(config: &McqConfig) -> Self {
        Self {
            noise: NoiseFilter::new(config.min_line_chars, config.max_line_repeats),
            ranker: SentenceRanker::new(config.ranker_top_n),
            max_chars: config.max_chars,
        }
    }

    pub fn run(&self, raw: &str) -> String {
        let text = self.noise.apply(raw);
        debug!("After noise removal: {} chars", text.chars().count());

        let text = self.ranker.rank(&text);
        debug!("After sentence ranking: {} chars", text.chars().count());

        let text = trim_stopwords(&text);
        debug!("After stopword removal: {} chars", text.chars().count());

        truncate_chars(&text, self.max_chars)
    }
}

/// First `max` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
