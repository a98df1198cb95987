//! Sentence ranking: keep the most information-dense sentences.
//!
//! Scoring favours sentences that mention many capitalised terms and words
//! that recur across the document, prefers short sentences, and rewards
//! definitional phrasing ("X is Y"), which is what quiz questions are built
//! from.
//!
//! ```text
//! density  = (cap_count + term_count) / word_count
//! score    = density × length_penalty × definition_bonus
//! ```
//!
//! Output keeps score order, not document order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

const MIN_SENTENCE_CHARS: usize = 20;
const MIN_SCORED_WORDS: usize = 5;
const LONG_SENTENCE_WORDS: usize = 25;
const LONG_SENTENCE_PENALTY: f64 = 0.7;
const DEFINITION_BONUS: f64 = 1.2;
const DEFINITION_CUES: [&str; 4] = [" is ", " are ", " has ", " have "];

/// Lowercase word → occurrences across the kept sentences.
pub type TermFrequencyMap = HashMap<String, usize>;

/// Selects the top-N sentences by information density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceRanker {
    pub top_n: usize,
}

impl Default for SentenceRanker {
    fn default() -> Self {
        Self { top_n: 15 }
    }
}

impl SentenceRanker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Return the `top_n` best sentences joined by `". "` with a final period.
    ///
    /// When the text has no more than `top_n` usable sentences it is returned
    /// unchanged.
    pub fn rank(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= self.top_n {
            return text.to_string();
        }

        let term_freq = term_frequencies(&sentences);

        let mut scored: Vec<(&str, f64)> = sentences
            .iter()
            .map(|s| (*s, score_sentence(s, &term_freq)))
            .collect();
        // Stable: equal scores keep document order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let top: Vec<&str> = scored
            .into_iter()
            .take(self.top_n)
            .map(|(s, _)| s)
            .collect();
        format!("{}.", top.join(". "))
    }
}

/// Split on runs of `.`, `!`, `?`; keep trimmed pieces longer than 20 chars.
pub fn split_sentences(text: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Build the global lowercase word-frequency map for one ranking pass.
pub fn term_frequencies(sentences: &[&str]) -> TermFrequencyMap {
    let mut freq = TermFrequencyMap::new();
    for word in sentences.iter().flat_map(|s| s.split_whitespace()) {
        *freq.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    freq
}

/// Information-density score of a single sentence; 0 for fewer than 5 words.
pub fn score_sentence(sentence: &str, term_freq: &TermFrequencyMap) -> f64 {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() < MIN_SCORED_WORDS {
        return 0.0;
    }

    let cap_count = words
        .iter()
        .filter(|w| starts_uppercase(w) && w.chars().count() > 2)
        .count();
    let term_count: usize = words
        .iter()
        .map(|w| term_freq.get(&w.to_lowercase()).copied().unwrap_or(0))
        .sum();

    let density = (cap_count + term_count) as f64 / words.len() as f64;
    let length_penalty = if words.len() <= LONG_SENTENCE_WORDS {
        1.0
    } else {
        LONG_SENTENCE_PENALTY
    };
    let lower = sentence.to_lowercase();
    let definition_bonus = if DEFINITION_CUES.iter().any(|cue| lower.contains(cue)) {
        DEFINITION_BONUS
    } else {
        1.0
    };

    density * length_penalty * definition_bonus
}

pub(crate) fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_runs() {
        let text = "Short one. This sentence is long enough to keep!!! Another usable sentence here?";
        assert_eq!(
            split_sentences(text),
            vec![
                "This sentence is long enough to keep",
                "Another usable sentence here"
            ]
        );
    }

    #[test]
    fn few_sentences_pass_through_unchanged() {
        let text = "Alpha particles carry a positive charge. Beta particles are fast electrons!";
        assert_eq!(SentenceRanker::new(20).rank(text), text);
        assert_eq!(SentenceRanker::default().top_n, 15);
    }

    #[test]
    fn short_sentences_score_zero() {
        let freq = TermFrequencyMap::new();
        assert_eq!(score_sentence("Only four words here", &freq), 0.0);
    }

    #[test]
    fn score_formula() {
        // 5 words, one capitalised (> 2 chars), no frequency data, " is " bonus.
        let freq = TermFrequencyMap::new();
        let s = score_sentence("Oxygen is needed for breathing", &freq);
        assert!((s - (1.0 / 5.0) * 1.2).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn long_sentences_are_penalised() {
        let freq = TermFrequencyMap::new();
        let words: Vec<String> = (0..26).map(|i| format!("Word{i}")).collect();
        let s = score_sentence(&words.join(" "), &freq);
        assert!((s - 0.7).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn term_frequency_counts_lowercase() {
        let freq = term_frequencies(&["Cell walls protect", "the cell membrane"]);
        assert_eq!(freq.get("cell"), Some(&2));
        assert_eq!(freq.get("walls"), Some(&1));
    }

    #[test]
    fn keeps_top_n_in_score_order() {
        let text = "plain words without anything special at all here. \
                    Photosynthesis is how Green Plants make Sugar. \
                    another ordinary line of lowercase text follows";
        let out = SentenceRanker::new(1).rank(text);
        assert_eq!(out, "Photosynthesis is how Green Plants make Sugar.");
    }

    #[test]
    fn ties_keep_document_order() {
        let text = "first sentence with exactly seven words. \
                    second sentence with exactly seven words. \
                    third sentence with exactly seven words";
        let out = SentenceRanker::new(2).rank(text);
        assert_eq!(
            out,
            "first sentence with exactly seven words. second sentence with exactly seven words."
        );
    }
}
